mod cli;
mod commands;
mod logging;

use cli::{CheckParams, PlanParams, RootsParams, build_cli, parse_verbosity};

fn main() {
    let matches = build_cli().get_matches();

    if let Some((_, m)) = matches.subcommand() {
        logging::init(parse_verbosity(m));
    }

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("plan", m)) => {
            let params = PlanParams::from_matches(m);
            commands::plan::run(params.into());
        }
        Some(("roots", m)) => {
            let params = RootsParams::from_matches(m);
            commands::roots::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
