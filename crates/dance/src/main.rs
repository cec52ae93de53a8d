mod config;
mod scene;

use anyhow::Result;
use clap::Parser;

use dance_engine::camera::CameraState;
use dance_engine::frame_loop::MainLoop;
use dance_engine::logging::init_logging;
use dance_engine::render::Scene;
use dance_engine::window::Runtime;

use crate::config::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logging());
    cli.validate()?;

    let view = cli.view_projection();
    let loop_config = cli.loop_config();
    log::debug!("camera: {view:?}, loop: {loop_config:?}");

    Runtime::run(cli.runtime_config(), cli.gpu_init(), move |factory| {
        let scene = Scene::from_table(factory, &scene::mesh_table())?;
        Ok(MainLoop::new(scene, view, CameraState::default(), loop_config))
    })
}
