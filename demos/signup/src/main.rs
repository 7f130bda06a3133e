//! Headless signup form. Scripts a user filling in two fields and pressing
//! the submit button, stepping frames until the animations settle.
//!
//! Usage: `signup [theme.json]`. Run with `RUST_LOG=debug` to see the form's
//! update log.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use formkit_core::*;
use formkit_ui::*;

const FRAME: Duration = Duration::from_millis(16);

struct App {
    form: Form,
    name: Rc<RefCell<Input>>,
    email: Rc<RefCell<Input>>,
    button: Rc<RefCell<SubmitButton>>,
}

impl App {
    fn new() -> Self {
        let form = Form::new()
            .name("signup")
            .on_change(|agg| log::info!("form changed: {} field(s)", agg.len()))
            .on_submit(|agg| match serde_json::to_string_pretty(agg) {
                Ok(json) => println!("submitted:\n{json}"),
                Err(e) => log::error!("could not encode submission: {e}"),
            });

        let (name, email, button) = form.provide(|| {
            let name = Input::new("Name", update_on_change("name"))
                .name("name")
                .required(true);
            let email = Input::new("Email", update_on_change("email"))
                .name("email")
                .input_type("email")
                .required(true);
            let button = SubmitButton::new("Sign up").attr("name", "signup");
            (
                Rc::new(RefCell::new(name)),
                Rc::new(RefCell::new(email)),
                Rc::new(RefCell::new(button)),
            )
        });

        let form = form.render({
            let (name, email, button) = (name.clone(), email.clone(), button.clone());
            move |agg| {
                let greeting = match agg.get_str("name") {
                    Some(n) if !n.is_empty() => format!("Welcome, {n}"),
                    _ => "Create an account".to_string(),
                };
                Column(Modifier::new().padding(Length::Px(24.0))).child((
                    Text(greeting, TextStyle::default()),
                    name.borrow().view(),
                    email.borrow().view(),
                    button.borrow().view(),
                ))
            }
        });

        Self {
            form,
            name,
            email,
            button,
        }
    }

    fn tick(&self, dt: Duration) -> bool {
        let a = self.name.borrow_mut().tick(dt);
        let b = self.email.borrow_mut().tick(dt);
        let c = self.button.borrow_mut().tick(dt);
        a || b || c
    }
}

/// Steps frames until nothing animates. Returns the last frame.
fn settle(sched: &mut Scheduler, clock: &TestClock, app: &App) -> Frame {
    loop {
        clock.advance(FRAME);
        let frame = sched.frame(|dt| {
            let animating = app.tick(dt);
            (app.form.view(), animating)
        });
        if !frame.animating || frame.number > 600 {
            log::debug!("settled at frame {}", frame.number);
            return frame;
        }
    }
}

fn type_into(input: &Rc<RefCell<Input>>, text: &str) {
    let mut input = input.borrow_mut();
    input.focus();
    for end in text.char_indices().map(|(i, c)| i + c.len_utf8()) {
        input.change(ChangeEvent::new(&text[..end]));
    }
    input.blur();
}

fn load_theme() -> anyhow::Result<Theme> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(Theme::default());
    };
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing theme {path}"))
}

fn run() {
    let clock = TestClock::install();
    let mut sched = Scheduler::new();
    let app = sched.mount(App::new);

    let frame = settle(&mut sched, &clock, &app);
    println!("{}", frame.view.text_content());

    type_into(&app.name, "Alice");
    type_into(&app.email, "alice@example.com");
    let frame = settle(&mut sched, &clock, &app);
    println!("{}", frame.view.text_content());

    let bounds = Rect {
        x: 0.0,
        y: 0.0,
        w: 120.0,
        h: 40.0,
    };
    let press = PointerEvent::mouse(
        PointerEventKind::Down(PointerButton::Primary),
        Vec2 { x: 60.0, y: 20.0 },
    );
    app.button.borrow_mut().handle_pointer(&press, bounds);
    settle(&mut sched, &clock, &app);
    log::info!("pressed scale {:.2}", app.button.borrow().scale());

    let release = PointerEvent::mouse(
        PointerEventKind::Up(PointerButton::Primary),
        Vec2 { x: 60.0, y: 20.0 },
    );
    app.button.borrow_mut().handle_pointer(&release, bounds);
    app.button.borrow().click();
    settle(&mut sched, &clock, &app);

    sched.unmount();
    reset_clock();
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let theme = load_theme()?;
    with_theme(theme, run);
    Ok(())
}
