#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        cake in class is OK
        "yum chocolate"
    }

    tests! {
        print_values in class is OK
        "<class Cake>"
        "<instance Cake>"
    }

    tests! {
        reference_self in class is OK
        "<instance Foo>"
    }
}
