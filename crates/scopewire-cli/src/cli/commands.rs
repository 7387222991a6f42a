//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("scopewire")
        .about("Resolve dependency-injection scope graphs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(plan_command())
        .subcommand(roots_command())
}

/// Validate that manifests resolve.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate that manifests resolve")
        .override_usage(
            "\
  scopewire check <MANIFEST>...
  scopewire check <DIR>
  scopewire check -",
        )
        .after_help(
            r#"EXAMPLES:
  scopewire check app.json            # single manifest
  scopewire check app.json net.json   # merge manifests
  scopewire check manifests/          # every *.json in a directory
  cat app.json | scopewire check -    # stdin"#,
        )
        .arg(manifest_paths_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Print the resolved plan.
pub fn plan_command() -> Command {
    Command::new("plan")
        .about("Print the resolved scope plan")
        .override_usage(
            "\
  scopewire plan <MANIFEST>...
  scopewire plan <MANIFEST>... --format json [--compact] [-o <FILE>]",
        )
        .after_help(
            r#"EXAMPLES:
  scopewire plan app.json                      # scope tree per root
  scopewire plan app.json --no-passthroughs    # hide relayed slots
  scopewire plan manifests/ --format json      # plan for code generators
  scopewire plan app.json --format json -o plan.json"#,
        )
        .arg(manifest_paths_arg())
        .arg(format_arg())
        .arg(compact_arg())
        .arg(no_passthroughs_arg())
        .arg(output_file_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// List true roots.
pub fn roots_command() -> Command {
    Command::new("roots")
        .about("List root instantiables, one per line")
        .override_usage("  scopewire roots <MANIFEST>...")
        .after_help(
            r#"EXAMPLES:
  scopewire roots app.json
  scopewire roots manifests/"#,
        )
        .arg(manifest_paths_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}
