use clap::{Arg, ArgAction, Command};
use tapkit::{
    classify_device, click_element, hold_and_release, is_element_visible, BrowserConfig,
    ChromeDriver, Config, Driver, InteractionOptions,
};
use tracing::{error, info};
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let matches = Command::new("tapkit")
        .about("Drive a page with cross-device interaction helpers")
        .arg(Arg::new("url").required(true).help("Page to open"))
        .arg(
            Arg::new("selector")
                .long("selector")
                .default_value("body")
                .help("Element to exercise"),
        )
        .arg(
            Arg::new("mobile")
                .long("mobile")
                .action(ArgAction::SetTrue)
                .help("Emulate a phone-sized viewport and user agent"),
        )
        .arg(
            Arg::new("hold-ms")
                .long("hold-ms")
                .value_parser(clap::value_parser!(u64))
                .default_value("600")
                .help("Hold duration for the sustained-press demo"),
        )
        .get_matches();

    let url = Url::parse(matches.get_one::<String>("url").expect("url is required"))?;
    let selector = matches
        .get_one::<String>("selector")
        .expect("selector has a default")
        .clone();
    let hold_ms = *matches
        .get_one::<u64>("hold-ms")
        .expect("hold-ms has a default");

    let mut config = Config::default();
    if matches.get_flag("mobile") {
        config.browser = BrowserConfig::mobile();
    }

    let mut driver = ChromeDriver::new();
    driver.launch(&config).await?;
    let page = driver.new_page().await?;

    info!(url = %url, "navigating");
    driver.navigate(&page, url.as_str()).await?;
    info!(url = %driver.get_url(&page).await?, "loaded");

    let profile = classify_device(&driver, &page).await?;
    info!(
        is_mobile = profile.is_mobile,
        viewport_width = profile.viewport_width,
        viewport_height = profile.viewport_height,
        "classified page"
    );

    if is_element_visible(&driver, &page, &selector, InteractionOptions::default()).await {
        info!(selector = %selector, "clicking");
        click_element(&driver, &page, &selector, InteractionOptions::default()).await?;

        info!(selector = %selector, hold_ms, "holding");
        hold_and_release(&driver, &page, &selector, hold_ms, InteractionOptions::default())
            .await?;

        info!("done");
    } else {
        error!(selector = %selector, "element never became visible");
    }

    driver.close().await?;
    Ok(())
}
