use learngl::{app, demos};

fn main() -> anyhow::Result<()> {
    app::run(demos::hello_window)
}
