use trundle::{ShowroomConfig, TrundleApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,wgpu_core=warn,wgpu_hal=warn,naga=warn"),
    )
    .init();

    let config = ShowroomConfig::from_env();
    log::info!(
        "Starting at {}x{} (stats {}, vsync {})",
        config.window_size.0,
        config.window_size.1,
        if config.show_stats { "on" } else { "off" },
        if config.vsync { "on" } else { "off" },
    );

    TrundleApp::new(config).run()
}
