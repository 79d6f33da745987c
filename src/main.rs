use anyhow::{Context, Result};
use vibeflow::analytics;
use vibeflow::config::Config;
use vibeflow::logger;
use vibeflow::utils::datetime;
use vibeflow::App;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().nth(1).as_deref() == Some("--generate-config") {
        let path = Config::get_default_config_path()?;
        return Config::generate_default_config(&path);
    }

    let config = Config::load().context("Failed to load configuration")?;
    logger::init(&config.logging)?;

    let mut app = App::start(&config).await?;

    if !app.persistence_available() {
        eprintln!("⚠️ Storage is unavailable, nothing will be saved this session");
    }

    if app.state().user().is_none() {
        match std::env::var("VIBEFLOW_EMAIL") {
            Ok(email) => {
                if let Err(e) = app.login(&email).await {
                    eprintln!("❌ {e}");
                    return Ok(());
                }
            }
            Err(_) => {
                eprintln!("❌ Not signed in");
                eprintln!("\n💡 Set VIBEFLOW_EMAIL to the email of a local account to see your dashboard.");
                app.flush().await;
                return Ok(());
            }
        }
    }

    print_dashboard(&app);
    app.flush().await;
    Ok(())
}

fn print_dashboard(app: &App) {
    let state = app.state();
    let today = datetime::today();

    if let Some(user) = state.user() {
        println!("👋 {} ({})", user.name, user.email);
        println!("🔥 Streak: {} days", user.streak);
        println!("🏆 Total XP: {}", user.total_points);
    }
    println!("📈 Today's score: {}", analytics::points_for_day(state.tasks(), today));
    println!();

    for category in state.active_categories() {
        println!("{} [{}]", category.name, category.icon);
        for task in state.tasks_in_category(&category.id) {
            let mark = if task.is_completed_on(today) { "✅" } else { "⬜" };
            println!("  {mark} {} ({} pts)", task.name, task.points);
        }
    }
}
