mod app;
mod config;
mod error;
mod history;
mod inspector;
mod logging;
mod mpris;
mod navigator;
mod runtime;
mod session;
mod track;
mod tracker;
mod ui;
mod webdriver;
mod worker;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
