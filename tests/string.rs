#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        concat in string is OK
        "hello world"
    }

    tests! {
        multiline in string is OK
        "first"
        "second"
        "after"
    }

    tests! {
        unterminated in string is ERR(65)
        "[line 1] Error: Unterminated string"
    }
}
