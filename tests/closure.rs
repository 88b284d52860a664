#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        counter in closure is OK
        "1"
        "2"
        "3"
    }

    tests! {
        assign_to_closure in closure is OK
        "local"
        "after f"
        "after f"
        "after g"
    }

    tests! {
        close_over_parameter in closure is OK
        "param"
    }

    tests! {
        nested_closure in closure is OK
        "a"
        "b"
        "c"
    }
}
