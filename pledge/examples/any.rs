//! Example: Falling back across several sources with `Promise::any`

use pledge::{Promise, RuntimeBuilder};

fn main() {
    // Report unhandled rejections instead of panicking
    let runtime = RuntimeBuilder::new()
        .on_unhandled_rejection(|err| eprintln!("{err}"))
        .build();

    let first = runtime.block_on(|| {
        let sources = vec![
            Promise::<&str, &str>::reject("cache miss"),
            Promise::resolve("replica"),
            Promise::resolve("primary"),
        ];

        Promise::any(sources).catch(|err| {
            eprintln!("{err}: {:?}", err.reasons);
            Ok("none")
        })
    });

    println!("served by {:?}", first.peek());
}
