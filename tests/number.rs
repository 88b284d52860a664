#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        literals in number is OK
        "123"
        "987654"
        "0"
        "-0"
        "123.456"
        "-0.001"
    }

    tests! {
        division in number is OK
        "0.5"
        "2.5"
    }

    tests! {
        alpha_after_number in number is ERR(65)
        "[line 1] Error: Invalid identifier or characters in number literal"
    }
}
