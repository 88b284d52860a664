#[macro_use]
mod common;

#[cfg(test)]
mod _while {
    tests! {
        basic in while is OK
        "0"
        "1"
        "2"
    }

    tests! {
        nested_break in while is OK
        "2"
        "2"
        "2"
        "done"
    }
}
