//! Lesson 4: Closures
//!
//! Run with: cargo run --bin lesson_04_closures

use std::collections::HashMap;

use lesson_course::{banner, key_points};

fn make_counter() -> impl FnMut() -> u32 {
    let mut count = 0;
    move || {
        count += 1;
        count
    }
}

fn make_adder(n: i32) -> impl Fn(i32) -> i32 {
    move |x| x + n
}

fn make_accumulator() -> impl FnMut(i32) -> i32 {
    let mut total = 0;
    move |x| {
        total += x;
        total
    }
}

fn make_greeter(greeting: String) -> impl Fn(&str) -> String {
    move |name| format!("{}, {}!", greeting, name)
}

/// A closure-backed account: the balance is only reachable through the
/// returned functions.
struct Account {
    deposit: Box<dyn FnMut(f64) -> f64>,
    balance: Box<dyn Fn() -> f64>,
}

fn make_account(initial: f64) -> Account {
    use std::cell::Cell;
    use std::rc::Rc;

    let balance = Rc::new(Cell::new(initial));
    let for_deposit = Rc::clone(&balance);
    Account {
        deposit: Box::new(move |amount| {
            for_deposit.set(for_deposit.get() + amount);
            for_deposit.get()
        }),
        balance: Box::new(move || balance.get()),
    }
}

fn process_numbers(numbers: &[i32], mut callback: impl FnMut(i32)) {
    for &n in numbers {
        callback(n);
    }
}

fn memoized_fibonacci() -> impl FnMut(u64) -> u64 {
    let mut cache: HashMap<u64, u64> = HashMap::new();
    fn fib(n: u64, cache: &mut HashMap<u64, u64>) -> u64 {
        if n < 2 {
            return n;
        }
        if let Some(&hit) = cache.get(&n) {
            return hit;
        }
        let value = fib(n - 1, cache) + fib(n - 2, cache);
        cache.insert(n, value);
        value
    }
    move |n| fib(n, &mut cache)
}

fn main() {
    banner("Rust Closures Tutorial");

    println!("1. Basic closure:");
    let message = "captured by reference";
    let show = || println!("   {}", message);
    show();

    println!("\n2. Closure factory (counter):");
    let mut counter = make_counter();
    println!("   {} {} {}", counter(), counter(), counter());
    let mut other = make_counter();
    println!("   a second counter starts fresh: {}", other());

    println!("\n3. Closure with captured parameter:");
    let add_five = make_adder(5);
    let add_ten = make_adder(10);
    println!("   add_five(3) = {}, add_ten(3) = {}", add_five(3), add_ten(3));

    println!("\n4. Accumulator:");
    let mut acc = make_accumulator();
    for x in [10, 20, 30] {
        println!("   after adding {}: {}", x, acc(x));
    }

    println!("\n5. Closures in a loop each capture their own value:");
    let printers: Vec<Box<dyn Fn() -> String>> = (0..3)
        .map(|i| Box::new(move || format!("closure {}", i)) as Box<dyn Fn() -> String>)
        .collect();
    for p in &printers {
        println!("   {}", p());
    }

    println!("\n6. Closure for configuration:");
    let hello = make_greeter("Hello".to_string());
    let hola = make_greeter("Hola".to_string());
    println!("   {}", hello("Alice"));
    println!("   {}", hola("Bob"));

    println!("\n7. Closure for state (account balance):");
    let mut account = make_account(100.0);
    (account.deposit)(50.0);
    (account.deposit)(25.5);
    println!("   Balance: {:.2}", (account.balance)());

    println!("\n8. Closure as callback:");
    let mut sum = 0;
    process_numbers(&[1, 2, 3, 4], |n| sum += n);
    println!("   Sum via callback: {}", sum);

    println!("\n9. Memoized fibonacci:");
    let mut fib = memoized_fibonacci();
    println!("   fib(50) = {}", fib(50));
    println!("   fib(90) = {}", fib(90));

    key_points(&[
        "Fn borrows, FnMut mutably borrows, FnOnce consumes its captures",
        "`move` transfers ownership of captured values into the closure",
        "Return closures as `impl Fn...` or `Box<dyn Fn...>`",
        "Shared mutable state between closures needs Rc<Cell> or similar",
    ]);
}
