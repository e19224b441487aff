use glint::App;

fn main() -> glint::Result<()> {
    env_logger::init();
    App::new().with_title("glint").with_size(800, 800).run()
}
