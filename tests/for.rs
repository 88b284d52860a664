#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        basic in for is OK
        "0"
        "1"
        "2"
    }

    tests! {
        loop_break in for is OK
        "0"
        "1"
        "2"
    }

    tests! {
        scope in for is OK
        "0"
        "global"
    }

    tests! {
        no_increment in for is OK
        "0"
        "1"
        "2"
    }
}
