use devtop_core::{CancelToken, Dashboard, DashboardConfig, NvidiaSmi};

use crate::tui::app::TerminalSink;

pub fn run(config: DashboardConfig, program: &str) {
    // Ctrl+C is the only way out; the terminal stays in cooked mode so the
    // interrupt reaches this handler as a signal.
    let cancel = CancelToken::new();
    let handler = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler.cancel()) {
        eprintln!("Error setting Ctrl+C handler: {e}");
        std::process::exit(1);
    }

    let mut sink = match TerminalSink::enter() {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("TUI error: {e}");
            std::process::exit(1);
        }
    };

    let mut query = NvidiaSmi::with_program(program);
    let mut dashboard = Dashboard::new(config);
    let result = dashboard.run(&mut query, &mut sink, &cancel);

    // Always restore the terminal, even if the loop returned an error.
    let restored = sink.leave();

    if let Err(e) = result {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = restored {
        eprintln!("Error restoring terminal: {e}");
        std::process::exit(1);
    }
}
