use std::io;

use nightcade::app;
use nightcade::games::jump_ball::JumpBall;

fn main() -> io::Result<()> {
    app::launch(|settings| JumpBall::new(settings.jump_ball.clone(), settings.seed))
}
