macro_rules! print_header {
    ($msg: expr) => {
        println!("\n==== {} ====", $msg)
    };
}

macro_rules! print_param {
    ($name: expr, $value: expr) => {
        println!("{:<24} {}", format!("{}:", $name), $value)
    };
}

/// Evaluate an expression, printing how long it took.
macro_rules! time_function {
    ($name: expr, $body: expr) => {{
        let start = std::time::Instant::now();
        let result = $body;
        println!("{:<32} {:>10.3} ms", $name, start.elapsed().as_secs_f64() * 1e3);
        result
    }};
}

pub(crate) use print_header;
pub(crate) use print_param;
pub(crate) use time_function;
