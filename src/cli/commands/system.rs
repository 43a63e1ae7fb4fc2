use crate::cli::core::{CommandError, CommandResult};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "Show or change a preference",
            "config [key value]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let config = &context.config;
            output::section("Configuration");
            output::info(format!("  locale                 : {}", config.locale));
            output::info(format!("  currency               : {}", config.currency));
            output::info(format!("  upcoming_window_days   : {}", config.upcoming_window_days));
            output::info(format!("  top_subscription_limit : {}", config.top_subscription_limit));
            output::info(format!("  ui_color_enabled       : {}", config.ui_color_enabled));
            output::info(format!(
                "  file                   : {}",
                context.config_manager.config_path().display()
            ));
            Ok(())
        }
        [key, value] => {
            context.config.set(key, value)?;
            output::set_color_enabled(context.config.ui_color_enabled);
            context.persist_config()?;
            output::success(format!("Set {key} = {value}."));
            Ok(())
        }
        _ => Err(CommandError::usage("config [key value]")),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Subcycle {}", meta.version));
    output::info(format!("  Build hash : {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("  Built at   : {}", meta.timestamp));
    output::info(format!("  Target     : {}", meta.target));
    output::info(format!("  Profile    : {}", meta.profile));
    output::info(format!("  Rustc      : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
