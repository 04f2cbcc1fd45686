use crate::reports;
use clap::Args;
use fcopt::error::FcError;
use fcopt::form::Field;
use fcopt::orchestrator::MutationState;
use fcopt::render::DisplayModel;
use fcopt::session::Session;

/// Values are taken as raw text, exactly as typed into the form.
#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[arg(long)]
    pub num_customers: String,

    #[arg(long)]
    pub num_fc_candidates: String,

    /// Number of FCs to open
    #[arg(short = 'k', long = "k")]
    pub k: String,
}

pub async fn run(args: OptimizeArgs, mut session: Session) -> bool {
    // Fill the form in order; each field only opens once the previous one passes
    let entries = [
        (Field::NumCustomers, args.num_customers),
        (Field::NumFcCandidates, args.num_fc_candidates),
        (Field::K, args.k),
    ];
    for (field, raw) in entries {
        if let Err(e) = session.edit(field, raw) {
            eprintln!("❌ {}: {}", field, e);
            return false;
        }
    }

    let payload = match session.prepare() {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("❌ {}", e);
            return false;
        }
    };

    println!("\n🧮 === FACILITY LOCATION: OPTIMIZE === 🧮");
    println!(
        "⏳ Running optimization (timeout {}s)...",
        session.orchestrator().timeout().as_secs()
    );

    match session.orchestrator().submit(payload).await {
        Ok(MutationState::Success(body)) => {
            reports::print_result(&DisplayModel::project(&body));
            true
        }
        Ok(MutationState::Failed(message)) => {
            eprintln!("❌ Error: {}", message);
            false
        }
        Ok(other) => {
            eprintln!("⚠️  Request ended in unexpected state: {:?}", other);
            false
        }
        Err(FcError::Busy) => {
            eprintln!("⚠️  A request is already running");
            false
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            false
        }
    }
}
