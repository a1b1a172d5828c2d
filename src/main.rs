mod app;
mod artwork;
mod audio;
mod config;
mod library;
mod metadata;
mod runtime;
mod session;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
