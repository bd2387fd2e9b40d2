//! Example: Chaining promises on the Pledge runtime

use pledge::{Promise, task};

#[pledge::main]
fn main() {
    // Settle a promise later, from a queued microtask
    let greeting = Promise::<String, String>::new(|resolver| {
        task::spawn(move || resolver.resolve(String::from("Hello")));
        Ok(())
    });

    // Continuations run once the queue reaches them, never inline
    greeting
        .then(|text| Ok(format!("{text} from Pledge!")))
        .then(|text| {
            println!("{text}");
            Ok(())
        })
        .finally(|| {
            println!("done");
            Ok(())
        });

    println!("registered continuations");
}
