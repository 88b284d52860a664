#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        get_set in field is OK
        "apple"
        "2"
        "3"
    }

    tests! {
        field_shadows_method in field is OK
        "field"
    }

    tests! {
        undefined_property in field is ERR(70)
        "[line 2] Error at 'missing': Undefined property 'missing'"
    }

    tests! {
        set_on_non_instance in field is ERR(70)
        "[line 2] Error at 'field': Only instances have fields, got string type"
    }

    tests! {
        get_on_non_instance in field is ERR(70)
        "[line 2] Error at 'field': Only instances have properties, got number type"
    }
}
