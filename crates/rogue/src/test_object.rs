#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use serde::Deserialize;
    use serde_json::{Value, json};

    use crate::{Behavior, Error, Member, RogueObject, obj};

    fn person() -> RogueObject {
        logging::init_for_tests();
        obj([
            ("first_name", Member::from("Clifton")),
            ("last_name", Member::from("Craig")),
        ])
    }

    #[test]
    fn reads_back_registered_values() {
        let p = person();
        assert_eq!(p.get("first_name").unwrap(), "Clifton");
        assert_eq!(p.get("last_name").unwrap(), "Craig");
        assert_eq!(p.len(), 2);
        assert!(p.is_value("first_name"));
        assert!(!p.is_behavior("first_name"));
    }

    #[test]
    fn invokes_behavior_with_forwarded_args() {
        let o = obj([(
            "say_my_name_is",
            Member::behavior(|args| {
                json!(format!("my name is {}", args[0].as_str().unwrap_or_default()))
            }),
        )]);
        let result = o.call("say_my_name_is", &[json!("Cliff")]).unwrap();
        assert_eq!(result, "my name is Cliff");
        assert!(o.is_behavior("say_my_name_is"));
        assert!(!o.is_value("say_my_name_is"));
    }

    #[test]
    fn behavior_is_not_readable_as_value() {
        let o = obj([("greet", Member::behavior(|_| Value::Null))]);
        match o.get("greet") {
            Err(Error::BehaviorMember { name }) => assert_eq!(name, "greet"),
            other => panic!("expected BehaviorMember, got {other:?}"),
        }
        assert_eq!(o.value_names().count(), 0);
    }

    #[test]
    fn undefined_member_read_fails() {
        let p = person();
        match p.get("middle_name") {
            Err(Error::UndefinedMember { name }) => assert_eq!(name, "middle_name"),
            other => panic!("expected UndefinedMember, got {other:?}"),
        }
    }

    #[test]
    fn unknown_call_reports_name_and_args() {
        let p = person();
        let err = p
            .call("some_undefined_method", &[json!("x")])
            .unwrap_err();
        match &err {
            Error::Argument { name, args } => {
                assert_eq!(name, "some_undefined_method");
                assert_eq!(args, &vec![json!("x")]);
            }
            other => panic!("expected Argument, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Method :some_undefined_method not defined with arguments [\"x\"]"
        );
    }

    #[test]
    fn calling_a_value_member_is_an_argument_error() {
        let p = person();
        assert!(matches!(
            p.call("first_name", &[]),
            Err(Error::Argument { .. })
        ));
    }

    #[test]
    fn with_properties_chains() {
        let o = obj(Vec::<(String, Member)>::new())
            .with_properties([("a", Member::from(1))])
            .with_properties([("b", Member::from(2))]);
        assert_eq!(o.get("a").unwrap(), 1);
        assert_eq!(o.get("b").unwrap(), 2);
    }

    #[test]
    fn later_value_wins() {
        let o = obj([("a", Member::from(1))]).with_properties([("a", Member::from("one"))]);
        assert_eq!(o.get("a").unwrap(), "one");
        assert_eq!(o.len(), 1);
    }

    #[test]
    fn behaviors_survive_later_populates() {
        let o = obj([("double", Member::behavior(|a| json!(a[0].as_i64().unwrap_or(0) * 2)))])
            .with_properties([("name", Member::from("x"))]);
        assert_eq!(o.call("double", &[json!(21)]).unwrap(), 42);
    }

    #[test]
    fn registration_replaces_other_kind() {
        let o = obj([("m", Member::from(1))])
            .with_properties([("m", Member::behavior(|_| json!("called")))]);
        assert!(o.is_behavior("m"));
        assert!(!o.is_value("m"));
        assert_eq!(o.call("m", &[]).unwrap(), "called");

        let o = o.with_properties([("m", Member::from(2))]);
        assert!(o.is_value("m"));
        assert!(matches!(o.call("m", &[]), Err(Error::Argument { .. })));
        assert_eq!(o.len(), 1);
    }

    #[test]
    fn set_auto_vivifies_values() {
        let mut o = RogueObject::new();
        assert!(o.is_empty());
        o.set("title", "First Screen").unwrap();
        assert_eq!(o.get("title").unwrap(), "First Screen");
        o.set("title", json!({"text": "Second"})).unwrap();
        assert_eq!(o.get("title").unwrap()["text"], "Second");
    }

    #[test]
    fn set_refuses_behavior_names() {
        let mut o = obj([("greet", Member::behavior(|_| Value::Null))]);
        assert!(matches!(
            o.set("greet", 1),
            Err(Error::BehaviorMember { .. })
        ));
        assert!(o.call("greet", &[]).is_ok());
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut o = obj([("tags", Member::value(json!(["a"])))]);
        o.get_mut("tags")
            .unwrap()
            .as_array_mut()
            .unwrap()
            .push(json!("b"));
        assert_eq!(o.get("tags").unwrap(), &json!(["a", "b"]));
        assert!(matches!(
            o.get_mut("missing"),
            Err(Error::UndefinedMember { .. })
        ));
    }

    #[test]
    fn get_as_deserializes() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Screen {
            id: u32,
            title: String,
        }
        let o = obj([
            ("screen", Member::value(json!({"id": 1, "title": "First Screen"}))),
            ("count", Member::from(3)),
        ]);
        let screen: Screen = o.get_as("screen").unwrap();
        assert_eq!(
            screen,
            Screen {
                id: 1,
                title: "First Screen".into()
            }
        );
        assert_eq!(o.get_as::<u64>("count").unwrap(), 3);
        assert!(matches!(
            o.get_as::<String>("count"),
            Err(Error::Convert { .. })
        ));
    }

    #[test]
    fn behaviors_are_shared_not_copied() {
        let hits = Rc::new(Cell::new(0));
        let counter = {
            let hits = Rc::clone(&hits);
            Behavior::new(move |_| {
                hits.set(hits.get() + 1);
                json!(hits.get())
            })
        };
        let a = obj([("tick", Member::from(counter.clone()))]);
        let b = obj([("tick", Member::from(counter))]);
        a.call("tick", &[]).unwrap();
        b.call("tick", &[]).unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn serializes_value_members_only() {
        let o = person().with_properties([("greet", Member::behavior(|_| Value::Null))]);
        let text = serde_json::to_string(&o).unwrap();
        assert_eq!(text, r#"{"first_name":"Clifton","last_name":"Craig"}"#);
        assert_eq!(
            o.to_value(),
            json!({"first_name": "Clifton", "last_name": "Craig"})
        );
    }

    #[test]
    fn collects_from_iterators() {
        let mut o: RogueObject = vec![("a".to_string(), Member::from(true))]
            .into_iter()
            .collect();
        o.extend([("b", Member::from(false))]);
        assert_eq!(o.value_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(o.contains("b"));
        assert!(!o.contains("c"));
    }

    #[test]
    fn debug_lists_behavior_names() {
        let o = obj([
            ("x", Member::from(1)),
            ("f", Member::behavior(|_| Value::Null)),
        ]);
        let dbg = format!("{o:?}");
        assert!(dbg.contains("\"x\""));
        assert!(dbg.contains("Number(1)"));
        assert!(dbg.contains("behaviors: [\"f\"]"));
    }
}
