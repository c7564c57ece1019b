mod app;
mod db;
mod utils;

use app::App;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let app = App::new();
    std::process::exit(app.run());
}
