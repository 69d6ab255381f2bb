use std::process::ExitCode;

use distriboard::app::DashboardApp;

fn main() -> ExitCode {
    let app = match DashboardApp::from_env() {
        Ok(app) => app,
        Err(err) => err.exit(),
    };

    match app.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            app.reporter().report_error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
