use anyhow::Result;
use nimbus_core::{Config, LaunchEvent, LaunchFlow, LaunchScreen, OnboardingStore};
use nimbus_ui::{bridge, ActiveView, WeatherModel};
use nimbus_weather::{feel_label, ForecastSource};

fn main() -> Result<()> {
    nimbus_core::init()?;

    let config = Config::load_validated()?;
    let runtime = bridge::get_or_init_runtime()?;
    tracing::info!("Config loaded from {}", config.config_dir.display());

    let mut launch = LaunchFlow::new(OnboardingStore::open(&config.config_dir));
    let screen = runtime.block_on(launch.run_splash(config.launch.splash_delay()));
    if screen == LaunchScreen::Onboarding {
        println!(
            "Welcome to Nimbus - hourly and daily forecasts for {}.",
            config.weather.location_name
        );
        launch.handle(LaunchEvent::UnlockCompleted);
    }

    let client = bridge::forecast_client(&config.weather)?;
    let mut model = WeatherModel::new(client, runtime.clone());
    model.refresh();
    runtime.block_on(model.settle());

    render(&model, &config);
    Ok(())
}

fn render<S: ForecastSource>(model: &WeatherModel<S>, config: &Config) {
    match model.state().active() {
        ActiveView::Loading | ActiveView::Idle => println!("Loading..."),
        ActiveView::Error(_) => {
            println!("Error Occurred");
            if let Some(headline) = model.user_message() {
                println!("{}", headline);
            }
            if let Some(detail) = model.error_message() {
                println!("{}", detail);
            }
        }
        ActiveView::Data(data) => {
            println!("{}", config.weather.location_name);
            match model.today() {
                Some(today) => {
                    println!("{:.0}°  {}", today.mean, feel_label(today.mean));
                    println!("H:{:.0}°  L:{:.0}°", today.high, today.low);
                }
                None => println!("No readings for today"),
            }

            println!();
            for slot in model.hourly(config.weather.hourly_slots) {
                println!("{:>6}  {:>5.1}°  {}", slot.label, slot.temperature, slot.icon.icon_key());
            }

            println!();
            println!("FORECAST");
            for day in model.daily_forecast() {
                let condition = data
                    .condition_for(&day.date)
                    .map(|c| c.description())
                    .unwrap_or("");
                println!(
                    "{}  {:<12}  H:{:.0}°  L:{:.0}°  {}",
                    day.date,
                    day.icon.icon_key(),
                    day.high,
                    day.low,
                    condition
                );
            }
        }
    }
}
