//! Headless run of the full intro narrative: the splash sequence plays
//! out, its timeout callback flags the handoff, and the login intro
//! follows — the same wiring an app shell would use, with stdout in
//! place of a renderer.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use overture::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

fn main() {
    env_logger::init();

    let handoff = Rc::new(Cell::new(false));
    let flag = handoff.clone();
    let mut splash = SplashScreen::new(SplashConfig::default(), move || flag.set(true));
    splash.start();

    println!("-- splash --");
    let mut frame = 0u32;
    while !splash.is_faded_out() {
        splash.update(FRAME);
        frame += 1;
        if frame % 16 == 0 {
            let view = splash.view();
            println!(
                "{:>6} ms  {:<10} scale {:.3}  opacity {:.3}  rotation {:6.1}",
                frame * 16,
                format!("{:?}", splash.phase()),
                view.scale,
                view.opacity,
                view.rotation
            );
        }
    }
    assert!(handoff.get());

    println!("-- handoff -> login --");
    let mut login = LoginScreen::new(LoginConfig::default(), |kind: HapticKind| {
        println!("          *buzz* {:?}", kind)
    });
    login.start();

    let mut frame = 0u32;
    loop {
        login.update(FRAME);
        frame += 1;
        if frame % 16 == 0 {
            let view = login.view();
            println!(
                "{:>6} ms  {:<10} character {:7.1}  card y {:7.1}  card scale {:.3}",
                frame * 16,
                format!("{:?}", login.phase()),
                view.character_x,
                view.card_offset_y,
                view.card_scale
            );
        }
        let view = login.view();
        if login.status() == SequencerStatus::Completed
            && view.card_offset_y == 0.0
            && view.card_scale == 1.0
        {
            break;
        }
    }
    println!("-- card locked in place --");
}
