//! Headless login-screen session: the intro runs to rest, then the
//! scripted user tilts the card around, types credentials, and presses
//! the inert sign-in button.

use std::time::Duration;

use overture::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

fn run_for(screen: &mut LoginScreen, duration: Duration) {
    let mut remaining = duration;
    while remaining > Duration::ZERO {
        let step = FRAME.min(remaining);
        screen.update(step);
        remaining -= step;
    }
}

fn main() {
    env_logger::init();

    let mut screen = LoginScreen::new(LoginConfig::default(), |kind: HapticKind| {
        println!("          *buzz* {:?}", kind)
    });
    screen.start();

    // Let the walk/wave/drag narrative play out and the card settle
    while !(screen.status() == SequencerStatus::Completed
        && screen.view().card_offset_y == 0.0)
    {
        screen.update(FRAME);
    }
    let view = screen.view();
    println!(
        "intro settled: character {:.1}, card y {:.1}, card scale {:.3}",
        view.character_x, view.card_offset_y, view.card_scale
    );

    // Drag the card around and let it spring back
    screen.drag(Vec2::new(420.0, -180.0));
    run_for(&mut screen, Duration::from_millis(400));
    let tilt = screen.view().card_tilt;
    println!("tilted to ({:.2}, {:.2})", tilt.x, tilt.y);

    screen.release_drag();
    run_for(&mut screen, Duration::from_secs(2));
    let tilt = screen.view().card_tilt;
    println!("released, tilt back to ({:.2}, {:.2})", tilt.x, tilt.y);

    // Fill the form; values stay local, nothing is sent anywhere
    screen.form_mut().set_username("someone@example.com");
    screen.form_mut().set_password("hunter2");
    println!(
        "form: {} / {}",
        screen.form().username(),
        screen.form().password_display()
    );
    screen.form_mut().toggle_reveal();
    println!("revealed: {}", screen.form().password_display());

    screen.submit();
    println!("sign-in pressed; still on the login screen, by design");
}
