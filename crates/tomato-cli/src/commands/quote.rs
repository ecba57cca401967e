pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", tomato_core::quotes::any_quote());
    Ok(())
}
