use learngl::{app, demos};

fn main() -> anyhow::Result<()> {
    app::run(demos::red_triangle)
}
