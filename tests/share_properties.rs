// Properties of option forwarding in the share client
use std::sync::{Arc, Mutex};

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use serde_json::{Map, Value};
use web_snippets::share::{ShareClient, ShareSdk};
use web_snippets::SnippetError;

#[derive(Default)]
struct RecordingSdk {
    sent: Mutex<Vec<Value>>,
}

impl ShareSdk for RecordingSdk {
    fn init(&self, _key: &str) -> Result<(), SnippetError> {
        Ok(())
    }

    fn send_default(&self, options: &Value) -> Result<(), SnippetError> {
        self.sent.lock().unwrap().push(options.clone());
        Ok(())
    }
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 _\\-\"\\\\/]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(Value::Array),
            btree_map("[a-zA-Z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn json_object() -> impl Strategy<Value = Value> {
    btree_map("[a-zA-Z]{1,8}", json_value(), 0..5)
        .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>()))
}

proptest! {
    #[test]
    fn forwarded_object_equals_parsed_input(options in json_object()) {
        let sdk = Arc::new(RecordingSdk::default());
        let context = ShareClient::new(Arc::clone(&sdk)).init("k").unwrap();

        context.share(&options.to_string()).unwrap();

        let sent = sdk.sent.lock().unwrap();
        prop_assert_eq!(sent.len(), 1);
        prop_assert_eq!(&sent[0], &options);
    }

    #[test]
    fn invalid_serialized_options_never_invoke_send(input in ".{0,40}") {
        prop_assume!(serde_json::from_str::<Value>(&input).is_err());

        let sdk = Arc::new(RecordingSdk::default());
        let context = ShareClient::new(Arc::clone(&sdk)).init("k").unwrap();

        let result = context.share(&input);

        prop_assert!(matches!(result, Err(SnippetError::MalformedInput(_))));
        prop_assert!(sdk.sent.lock().unwrap().is_empty());
    }
}
