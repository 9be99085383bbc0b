//! Builds a roster of unrelated animal types and prints what each one eats.
//!
//! Run with `RUST_LOG=trace cargo run --example zoo --features tracing` to see
//! the container's lifecycle events.

use inplace_value::Capability;
use inplace_value::InplaceValue;
use tracing_subscriber::EnvFilter;

/// Food report of one animal.
type Animal = InplaceValue<(), String>;

struct Elephant {
    name: String,
}

struct Zebra {
    name: String,
}

struct Lion {
    name: String,
}

struct Penguin {
    name: String,
    colony: u16,
}

impl Capability for Elephant {
    type Output = String;

    fn invoke(&self, _: ()) -> String {
        format!("{} needs: hay, fruit, vegetables (300kg/day)", self.name)
    }
}

impl Capability for Zebra {
    type Output = String;

    fn invoke(&self, _: ()) -> String {
        format!("{} needs: hay, grass (15kg/day)", self.name)
    }
}

impl Capability for Lion {
    type Output = String;

    fn invoke(&self, _: ()) -> String {
        format!("{} needs: meat (11kg/day)", self.name)
    }
}

impl Capability for Penguin {
    type Output = String;

    fn invoke(&self, _: ()) -> String {
        format!(
            "{} needs: fish ({}kg/day for a colony of {})",
            self.name,
            2 * u32::from(self.colony),
            self.colony
        )
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut roster: Vec<Animal> = Vec::new();

    roster.push(InplaceValue::new(Lion {
        name: "Lion".to_string(),
    }));
    roster.push(InplaceValue::new(Zebra {
        name: "Zebra".to_string(),
    }));
    roster.push(InplaceValue::new(Elephant {
        name: "Elephant".to_string(),
    }));

    for animal in &roster {
        println!("{}", animal.invoke(()));
    }

    // Hand the lion's slot over to a penguin colony.
    let penguins: Animal = InplaceValue::new(Penguin {
        name: "Penguin".to_string(),
        colony: 12,
    });
    roster[0].assign(penguins);

    // Move the zebra to another enclosure; its slot stays behind, empty.
    let zebra = roster[1].take();
    println!("moved out: {}", zebra.invoke(()));

    for animal in &roster {
        match animal.try_invoke(()) {
            Ok(food) => println!("{}", food),
            Err(e) => println!("<{}>", e),
        }
    }
}
