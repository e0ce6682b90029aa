//! End-to-end encoding of records declared with `#[derive(FixedWidth)]`.

use std::rc::Rc;

use fixedwidth::{
    BoxError, Encode, EncodeError, Encoder, FixedWidth, MarshalText, Value, encode_via_marshal_text,
    marshal,
};

#[derive(FixedWidth)]
struct Student {
    #[fixed = "1,5"]
    id: i64,
    #[fixed = "6,15"]
    first_name: String,
    #[fixed = "16,25"]
    last_name: String,
    #[fixed = "26,30"]
    grade: f64,
}

#[derive(FixedWidth)]
struct H {
    #[fixed = "1,5"]
    f1: Value,
    #[fixed = "6,10"]
    f2: Value,
}

#[derive(FixedWidth)]
struct TagHelper {
    #[fixed = "1,5"]
    valid: String,
    #[allow(dead_code)]
    no_tags: String,
    #[fixed = "5"]
    invalid_tags: String,
}

#[derive(FixedWidth, Default)]
struct DifferentFixedTags {
    #[fixed = "1,5"]
    regular_str: String,
    #[fixed = "6,10"]
    regular_int: i64,

    #[fixed = "11,15,leftpad"]
    pad_str: String,
    #[fixed = "16,20,leftpad"]
    pad_int: i64,

    #[fixed = "21,30,leftpad"]
    pad_opt_str: Option<String>,
    #[fixed = "31,40,leftpad"]
    pad_opt_int: Option<i64>,
}

#[derive(FixedWidth)]
struct Untagged {
    #[allow(dead_code)]
    name: String,
}

#[derive(FixedWidth)]
struct Pair(#[fixed = "1,3"] &'static str, #[fixed = "4,6,leftpad"] i32);

#[derive(FixedWidth)]
struct Borrowed<'a> {
    #[fixed = "1,8"]
    name: &'a str,
    #[fixed = "9,12,leftpad"]
    count: Rc<i16>,
}

#[derive(FixedWidth)]
struct Envelope {
    #[fixed = "1,2"]
    kind: &'static str,
    #[fixed = "3,14"]
    body: Pair,
    #[fixed = "15,20"]
    code: Code,
}

struct Code {
    text: &'static str,
    fail: bool,
}

impl MarshalText for Code {
    fn marshal_text(&self) -> Result<Vec<u8>, BoxError> {
        if self.fail {
            return Err("marshal error".into());
        }
        Ok(self.text.to_uppercase().into_bytes())
    }
}

encode_via_marshal_text!(Code);

fn encoded<T: Encode + ?Sized>(value: &T) -> String {
    String::from_utf8(marshal(value).unwrap()).unwrap()
}

#[test]
fn test_student_roster() {
    let people = vec![Student {
        id: 1,
        first_name: "Ian".to_string(),
        last_name: "Lopshire".to_string(),
        grade: 99.5,
    }];
    let data = encoded(&people);
    assert_eq!(data, "1    Ian       Lopshire  99.50");
    assert_eq!(data.len(), 30);
}

#[test]
fn test_dynamic_fields() {
    let single = H {
        f1: "foo".into(),
        f2: 1i64.into(),
    };
    assert_eq!(encoded(&single), "foo  1    ");

    let many = vec![
        H {
            f1: "foo".into(),
            f2: 1i64.into(),
        },
        H {
            f1: "bar".into(),
            f2: 2i64.into(),
        },
    ];
    assert_eq!(encoded(&many), "foo  1    \nbar  2    ");
    assert_eq!(encoded(&Box::new(single)), "foo  1    ");
}

#[test]
fn test_invalid_type_in_record() {
    let record = H {
        f1: "foo".into(),
        f2: true.into(),
    };
    assert!(matches!(
        marshal(&record).unwrap_err(),
        EncodeError::InvalidType(_)
    ));
}

#[test]
fn test_untagged_and_invalid_tags_are_skipped() {
    let helper = TagHelper {
        valid: "foo".to_string(),
        no_tags: "foo".to_string(),
        invalid_tags: "foo".to_string(),
    };
    assert_eq!(encoded(&helper), "foo  ");
}

#[test]
fn test_no_positions_is_empty_line() {
    let record = Untagged {
        name: "ignored".to_string(),
    };
    assert_eq!(marshal(&record).unwrap(), b"");
}

#[test]
fn test_different_fixed_tags() {
    let record = DifferentFixedTags {
        regular_str: "one".to_string(),
        regular_int: 1,
        pad_str: "two".to_string(),
        pad_int: 2,
        pad_opt_str: Some("three".to_string()),
        pad_opt_int: Some(3),
    };
    assert_eq!(encoded(&record), "one  1      two00002     three0000000003");
}

#[test]
fn test_different_fixed_tags_without_values() {
    assert_eq!(
        encoded(&DifferentFixedTags::default()),
        "     0         00000          0000000000"
    );
}

#[test]
fn test_different_fixed_tags_full_pad() {
    let record = DifferentFixedTags {
        regular_str: "first".to_string(),
        regular_int: 12345,
        pad_str: "secnd".to_string(),
        pad_int: 67890,
        pad_opt_str: Some("three".to_string()),
        pad_opt_int: Some(3),
    };
    assert_eq!(encoded(&record), "first12345secnd67890     three0000000003");
}

#[test]
fn test_tuple_struct() {
    assert_eq!(encoded(&Pair("ab", 7)), "ab 007");
}

#[test]
fn test_borrowed_fields() {
    let name = String::from("widget");
    let record = Borrowed {
        name: &name,
        count: Rc::new(12),
    };
    assert_eq!(encoded(&record), "widget  0012");
}

#[test]
fn test_nested_record_and_marshal_text() {
    let record = Envelope {
        kind: "EV",
        body: Pair("xyz", 42),
        code: Code {
            text: "ok",
            fail: false,
        },
    };
    assert_eq!(encoded(&record), "EVxyz042      OK    ");
}

#[test]
fn test_marshal_text_error_is_passed_through() {
    let record = Envelope {
        kind: "EV",
        body: Pair("xyz", 42),
        code: Code {
            text: "",
            fail: true,
        },
    };
    let err = marshal(&record).unwrap_err();
    assert!(matches!(err, EncodeError::Delegated(_)));
    assert_eq!(err.to_string(), "marshal error");
}

#[test]
fn test_marshal_text_lines() {
    let codes = vec![
        Code {
            text: "foo",
            fail: false,
        },
        Code {
            text: "bar",
            fail: false,
        },
    ];

    let mut lf = Vec::new();
    Encoder::new(&mut lf).encode(&codes).unwrap();
    assert_eq!(lf, b"FOO\nBAR");

    let mut crlf = Vec::new();
    Encoder::new(&mut crlf)
        .with_line_end("\r\n")
        .encode(&codes)
        .unwrap();
    assert_eq!(crlf, b"FOO\r\nBAR");
}

#[test]
fn test_truncation() {
    #[derive(FixedWidth)]
    struct Short {
        #[fixed = "1,5"]
        name: &'static str,
    }

    assert_eq!(encoded(&Short { name: "Lopshire!" }), "Lopsh");
}

#[test]
fn test_unsupported_top_level() {
    assert!(matches!(
        marshal(&false).unwrap_err(),
        EncodeError::InvalidType(_)
    ));
}

#[derive(FixedWidth)]
struct Child {
    #[fixed = "1,3"]
    tag: &'static str,
}

#[derive(FixedWidth)]
struct Parent<'a> {
    #[fixed = "1,3"]
    child: &'a Child,
    #[fixed = "4,8"]
    name: &'a String,
    #[fixed = "9,12,leftpad"]
    count: &'a i64,
}

#[test]
fn test_reference_fields() {
    let child = Child { tag: "ab" };
    let name = String::from("ref");
    let count = 9;
    let record = Parent {
        child: &child,
        name: &name,
        count: &count,
    };
    assert_eq!(encoded(&record), "ab ref  0009");

    let other = Parent {
        child: &child,
        name: &name,
        count: &-1,
    };
    assert_eq!(encoded(&vec![&record, &other]), "ab ref  0009\nab ref  00-1");
}

#[derive(FixedWidth)]
struct Holder {
    #[fixed = "1,6,leftpad"]
    f1: Box<dyn Encode>,
    #[fixed = "7,10,leftpad"]
    f2: Box<dyn Encode>,
}

#[test]
fn test_dynamically_held_record_and_marshal_text() {
    let record = Holder {
        f1: Box::new(Child { tag: "ab" }),
        f2: Box::new(Code {
            text: "ok",
            fail: false,
        }),
    };
    assert_eq!(encoded(&record), "   ab   OK");

    let numbers = Holder {
        f1: Box::new(12i64),
        f2: Box::new(None::<i64>),
    };
    assert_eq!(encoded(&numbers), "    12    ");
}

#[test]
fn test_dynamically_held_error_is_passed_through() {
    let record = Holder {
        f1: Box::new(Code {
            text: "",
            fail: true,
        }),
        f2: Box::new("x"),
    };
    assert!(matches!(
        marshal(&record).unwrap_err(),
        EncodeError::Delegated(_)
    ));
}
