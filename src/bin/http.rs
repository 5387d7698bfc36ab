#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use timetable::{Schedule, ScheduleConfig, http_api, load_config_from_json, logging};

    logging::init(1);

    let addr: SocketAddr = std::env::var("TIMETABLE_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let config = match std::env::var("TIMETABLE_CONFIG") {
        Ok(path) => load_config_from_json(path)?,
        Err(_) => ScheduleConfig::default(),
    };

    println!("timetable HTTP API listening on http://{addr}");
    let schedule = Schedule::new(config);
    http_api::serve(addr, schedule).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
