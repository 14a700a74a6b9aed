use std::io;

use nightcade::app;
use nightcade::games::color_box::ColorBox;

fn main() -> io::Result<()> {
    app::launch(|settings| ColorBox::new(settings.color_box.clone(), settings.seed))
}
