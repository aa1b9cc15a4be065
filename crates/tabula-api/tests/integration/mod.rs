mod serve;
mod submit_flow;
mod views;
