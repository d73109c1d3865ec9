use super::{open_engine, resolve_today, resolve_user};

pub fn run(user: Option<String>, today: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (engine, config) = open_engine()?;
    let user = resolve_user(&config, user)?;
    let today = resolve_today(&config, today)?;

    let status = engine.continuity_status(&user, today, chrono::Utc::now())?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
