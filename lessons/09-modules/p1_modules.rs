//! Lesson 9: Modules, crates and visibility
//!
//! Run with: cargo run --bin lesson_09_modules

use lesson_course::util::mathutil::{self, add_non_negative};
use lesson_course::util::stringutil;
use lesson_course::{banner, key_points, section};

/// Inline module: items are private unless marked `pub`.
mod geometry {
    pub struct Square {
        pub side: f64,
        // private field: only constructible through `new`
        id: u32,
    }

    impl Square {
        pub fn new(side: f64) -> Self {
            Square {
                side,
                id: next_id(),
            }
        }

        pub fn area(&self) -> f64 {
            self.side * self.side
        }

        pub fn id(&self) -> u32 {
            self.id
        }
    }

    fn next_id() -> u32 {
        use std::sync::atomic::{AtomicU32, Ordering};
        static NEXT: AtomicU32 = AtomicU32::new(1);
        NEXT.fetch_add(1, Ordering::Relaxed)
    }

    pub mod units {
        pub const CM_PER_INCH: f64 = 2.54;

        pub fn inches_to_cm(inches: f64) -> f64 {
            inches * CM_PER_INCH
        }

        /// Visible to the parent module only.
        pub(super) fn internal_scale() -> f64 {
            super::super::SCALE
        }
    }

    pub fn scaled_area(sq: &Square) -> f64 {
        sq.area() * units::internal_scale()
    }
}

const SCALE: f64 = 1.0;

use geometry::units;

fn main() {
    banner("Modules and Visibility");

    section("Library modules");
    println!("1. mathutil::add(2, 3) = {}", mathutil::add(2, 3));
    println!("2. mathutil::multiply(4, 5) = {}", mathutil::multiply(4, 5));
    println!("3. mathutil::average(&[1, 2, 3, 4]) = {}", mathutil::average(&[1.0, 2.0, 3.0, 4.0]));
    println!("4. add_non_negative(-1, 2) = {:?}", add_non_negative(-1, 2));
    println!("5. stringutil::reverse(\"héllo\") = {}", stringutil::reverse("héllo"));
    println!("6. stringutil::to_upper(\"rust\") = {}", stringutil::to_upper("rust"));
    println!(
        "7. stringutil::is_palindrome(\"A man a plan a canal Panama\") = {}",
        stringutil::is_palindrome("A man a plan a canal Panama")
    );

    println!();
    section("Inline modules");
    let a = geometry::Square::new(3.0);
    let b = geometry::Square::new(1.5);
    println!("1. square #{} area {}", a.id(), a.area());
    println!("2. square #{} side {}", b.id(), b.side);
    println!("3. scaled area: {}", geometry::scaled_area(&a));
    println!("4. 10 in = {} cm", units::inches_to_cm(10.0));
    println!("5. constant through path: {}", geometry::units::CM_PER_INCH);

    key_points(&[
        "Everything is private by default; pub opens it to the parent and beyond",
        "pub(super) and pub(crate) narrow visibility further",
        "use brings paths into scope; self imports the module itself",
        "Files map to modules: util/mod.rs declares util::mathutil",
    ]);
}
