#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        super_method in inheritance is OK
        "A"
        "B"
    }

    tests! {
        inherit_methods in inheritance is OK
        "Base.foo()"
    }

    tests! {
        indirect in inheritance is OK
        "A.foo()"
    }

    tests! {
        super_init in inheritance is OK
        "from base"
    }

    tests! {
        superclass_must_be_class in inheritance is ERR(70)
        "[line 2] Error at 'NotClass': Superclass must be a class, got string type"
    }

    tests! {
        inherit_from_itself in inheritance is ERR(65)
        "[line 1] Error at 'Oops': A class cannot inherit from itself"
    }
}
