mod app;
mod gpu;

use std::process::ExitCode;
use std::time::Instant;

use winit::event_loop::{ControlFlow, EventLoop};

use game_of_life::control::Controller;
use game_of_life::LifeConfig;

use crate::app::App;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LifeConfig::default();
    let controller = match Controller::new(&config, Instant::now()) {
        Ok(controller) => controller,
        Err(err) => {
            log::error!("Cannot build grid: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {}", err);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, controller);
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
