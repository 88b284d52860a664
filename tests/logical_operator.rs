#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        short_circuit in logical_operator is OK
        "fallback"
        "2"
        "false"
        "first"
    }

    tests! {
        truthiness in logical_operator is OK
        "zero is true"
        "empty is true"
        "nil is false"
    }

    tests! {
        side_effects in logical_operator is OK
        "true"
        "false"
    }
}
