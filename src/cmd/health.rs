use fcopt::normalize::normalize;
use fcopt::session::Session;

pub async fn run(session: Session) -> bool {
    match session.orchestrator().transport().health().await {
        Ok(health) => {
            println!("✅ Model service status: {}", health.status);
            true
        }
        Err(failure) => {
            eprintln!("❌ Model service unreachable: {}", normalize(Some(&failure)));
            false
        }
    }
}
