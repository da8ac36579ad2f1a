use eframe::NativeOptions;
use spinwheel::{logger, App, EnvConfig, PersistState};

fn main() -> anyhow::Result<()> {
    simple_env_load::load_env_from([".dev.env"]);

    let logs = logger::init_logger()?;
    let config = EnvConfig::load_from_env()?;
    log::debug!("spin config: {:?}", config.spin);

    eframe::run_native(
        "Spin the Wheel",
        NativeOptions::default(),
        Box::new(move |cc| {
            let persist = cc
                .storage
                .and_then(PersistState::load)
                .unwrap_or_default();

            cc.egui_ctx.set_pixels_per_point(persist.pixels_per_point);
            Box::new(App::new(cc.egui_ctx.clone(), config, persist, logs))
        }),
    );

    Ok(())
}
