use rollcall::application_impl::{FakeAttendanceService, FakePortalAuth, HttpPortalClient};
use rollcall::application_port::{AttendanceService, PortalAuth, PortalError};
use rollcall::domain_model::CaptchaChallenge;
use rollcall::logger::*;
use rollcall::report;
use rollcall::session::LoginFlow;
use rollcall::settings::*;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let (auth, attendance): (Arc<dyn PortalAuth>, Arc<dyn AttendanceService>) =
        match project_settings.portal.backend.as_str() {
            "fake" => (
                Arc::new(FakePortalAuth::new()),
                Arc::new(FakeAttendanceService::new()),
            ),
            "http" => {
                let client = Arc::new(HttpPortalClient::new(
                    project_settings.portal.base_url.clone(),
                ));
                let auth: Arc<dyn PortalAuth> = client.clone();
                let attendance: Arc<dyn AttendanceService> = client;
                (auth, attendance)
            }
            other => return Err(anyhow::anyhow!("Unknown portal backend: {}", other)),
        };

    let username = match cli.username {
        Some(username) => username,
        None => prompt("Roll number: ")?,
    };
    let password = prompt("Password: ")?;

    let mut flow = LoginFlow::new(auth);
    let mut captcha_path: Option<PathBuf> = None;

    let session = loop {
        if flow.challenge().is_none() {
            if let Err(err) = flow.load_captcha().await {
                eprintln!("Failed to load captcha: {err}");
                prompt("Press enter to retry (Ctrl-C to quit) ")?;
                continue;
            }
        }
        if let Some(challenge) = flow.challenge() {
            // The superseded image file goes away before the replacement lands.
            if let Some(old) = captcha_path.take() {
                let _ = std::fs::remove_file(old);
            }
            let path = write_captcha_image(challenge)?;
            println!("Captcha image: {}", path.display());
            captcha_path = Some(path);
        }
        let answer = prompt("Captcha: ")?;

        match flow.submit(&username, &password, &answer).await {
            Ok(session) => break session,
            Err(err @ (PortalError::Auth(_) | PortalError::SessionMissing)) => {
                // The flow already reissued the challenge; just re-prompt.
                eprintln!("{err}");
            }
            Err(err) => {
                eprintln!("{err}");
                prompt("Press enter to retry (Ctrl-C to quit) ")?;
            }
        }
    };
    if let Some(old) = captcha_path.take() {
        let _ = std::fs::remove_file(old);
    }

    info!(user = %session.username, "session established");

    let records = attendance.fetch_attendance(&session.id).await?;
    println!();
    print!(
        "{}",
        report::render_report(&records, &project_settings.policy)
    );

    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn write_captcha_image(challenge: &CaptchaChallenge) -> anyhow::Result<PathBuf> {
    let ext = match challenge.image.media_type.as_str() {
        "image/png" => "png",
        _ => "jpg",
    };
    let path = std::env::temp_dir().join(format!("rollcall-captcha-{}.{ext}", std::process::id()));
    std::fs::write(&path, &challenge.image.bytes)?;
    Ok(path)
}
