use relaxql::{
    declare_relation, AssociationModel, AssociationOptions, DeclaratorConfig, Declarator,
    RecordingSink, RelationKind, RelationRequest, RelaxError,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

/// One registration call seen by the mock ORM
#[derive(Debug, Clone, PartialEq)]
struct Call {
    owner: String,
    method: &'static str,
    target: String,
    through: Option<String>,
    foreign_key: Option<String>,
    options: AssociationOptions,
}

#[derive(Debug, Clone, PartialEq)]
struct Rejected(&'static str);

impl std::fmt::Display for Rejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rejected {}", self.0)
    }
}

impl std::error::Error for Rejected {}

/// Mock model recording every registration into a shared log
struct MockModel {
    name: Option<&'static str>,
    plural: Option<&'static str>,
    log: Rc<RefCell<Vec<Call>>>,
    reject: Option<&'static str>,
}

impl MockModel {
    fn record(
        &self,
        method: &'static str,
        target: &Self,
        through: Option<&Self>,
        foreign_key: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), Rejected> {
        if self.reject == Some(method) {
            return Err(Rejected(method));
        }
        self.log.borrow_mut().push(Call {
            owner: self.label(),
            method,
            target: target.label(),
            through: through.map(MockModel::label),
            foreign_key: foreign_key.map(str::to_string),
            options: options.clone(),
        });
        Ok(())
    }

    fn label(&self) -> String {
        self.name.or(self.plural).unwrap_or("?").to_string()
    }
}

impl AssociationModel for MockModel {
    type Error = Rejected;

    fn declared_name(&self) -> Option<&str> {
        self.name
    }

    fn plural_name(&self) -> Option<&str> {
        self.plural
    }

    fn register_has_many(&self, target: &Self, fk: Option<&str>, options: &AssociationOptions) -> Result<(), Rejected> {
        self.record("hasMany", target, None, fk, options)
    }

    fn register_has_one(&self, target: &Self, fk: Option<&str>, options: &AssociationOptions) -> Result<(), Rejected> {
        self.record("hasOne", target, None, fk, options)
    }

    fn register_belongs_to(&self, target: &Self, fk: Option<&str>, options: &AssociationOptions) -> Result<(), Rejected> {
        self.record("belongsTo", target, None, fk, options)
    }

    fn register_belongs_to_many(
        &self,
        target: &Self,
        through: &Self,
        fk: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), Rejected> {
        self.record("belongsToMany", target, Some(through), fk, options)
    }
}

struct Fixture {
    log: Rc<RefCell<Vec<Call>>>,
    user: MockModel,
    post: MockModel,
    post_tag: MockModel,
}

impl Fixture {
    fn new() -> Self {
        let log = Rc::new(RefCell::new(Vec::new()));
        let model = |name| MockModel {
            name: Some(name),
            plural: None,
            log: Rc::clone(&log),
            reject: None,
        };
        Self {
            user: model("User"),
            post: model("Post"),
            post_tag: model("PostTag"),
            log,
        }
    }

    fn calls(&self) -> Vec<(String, &'static str, String)> {
        self.log
            .borrow()
            .iter()
            .map(|call| (call.owner.clone(), call.method, call.target.clone()))
            .collect()
    }

    fn declarator(sink: &RecordingSink) -> Declarator<&RecordingSink> {
        Declarator::with_sink(sink, DeclaratorConfig::default())
    }
}

fn call(owner: &str, method: &'static str, target: &str) -> (String, &'static str, String) {
    (owner.to_string(), method, target.to_string())
}

fn request<'a>(fx: &'a Fixture, kind: RelationKind) -> RelationRequest<'a, MockModel> {
    let request = RelationRequest::between(&fx.user, &fx.post, kind).with_foreign_key("userId");
    if kind == RelationKind::BelongsToMany {
        request.with_through(&fx.post_tag)
    } else {
        request
    }
}

#[test]
fn test_forward_only_makes_exactly_one_call() {
    let expected = [
        (RelationKind::HasMany, "hasMany"),
        (RelationKind::HasOne, "hasOne"),
        (RelationKind::BelongsTo, "belongsTo"),
        (RelationKind::BelongsToMany, "belongsToMany"),
    ];

    for (kind, method) in expected {
        let fx = Fixture::new();
        let sink = RecordingSink::new();

        Fixture::declarator(&sink)
            .declare(request(&fx, kind).with_inverse(false))
            .unwrap();

        assert_eq!(fx.calls(), vec![call("User", method, "Post")], "kind {kind}");
        assert!(sink.events().is_empty());
    }
}

#[test]
fn test_inverse_makes_forward_then_inverse_call() {
    let expected = [
        (RelationKind::HasMany, "hasMany", "belongsTo"),
        (RelationKind::HasOne, "hasOne", "belongsTo"),
        (RelationKind::BelongsTo, "belongsTo", "hasMany"),
        (RelationKind::BelongsToMany, "belongsToMany", "belongsToMany"),
    ];

    for (kind, forward, inverse) in expected {
        let fx = Fixture::new();
        let sink = RecordingSink::new();

        Fixture::declarator(&sink).declare(request(&fx, kind)).unwrap();

        assert_eq!(
            fx.calls(),
            vec![call("User", forward, "Post"), call("Post", inverse, "User")],
            "kind {kind}"
        );
        assert_eq!(sink.lines(), vec![format!("Post.{inverse}(User)")]);
    }
}

#[test]
fn test_has_many_scenario() {
    let fx = Fixture::new();
    let sink = RecordingSink::new();

    Fixture::declarator(&sink)
        .declare(
            RelationRequest::between(&fx.user, &fx.post, "hasMany")
                .with_foreign_key("userId")
                .with_inverse(true),
        )
        .unwrap();

    let log = fx.log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].foreign_key.as_deref(), Some("userId"));
    assert!(log[0].options.is_empty());
    assert_eq!((log[1].owner.as_str(), log[1].method), ("Post", "belongsTo"));
    assert_eq!(log[1].foreign_key.as_deref(), Some("userId"));
    assert_eq!(sink.lines(), vec!["Post.belongsTo(User)"]);
}

#[test]
fn test_belongs_to_inverse_is_has_many_not_has_one() {
    let fx = Fixture::new();
    let sink = RecordingSink::new();

    Fixture::declarator(&sink)
        .declare(RelationRequest::between(&fx.post, &fx.user, RelationKind::BelongsTo))
        .unwrap();

    assert_eq!(
        fx.calls(),
        vec![call("Post", "belongsTo", "User"), call("User", "hasMany", "Post")]
    );
    assert_eq!(sink.lines(), vec!["User.hasMany(Post)"]);
}

#[test]
fn test_many_to_many_inverse_omits_foreign_key() {
    let fx = Fixture::new();
    let sink = RecordingSink::new();

    Fixture::declarator(&sink)
        .declare(request(&fx, RelationKind::BelongsToMany).with_option("timestamps", false))
        .unwrap();

    let log = fx.log.borrow();
    assert_eq!(log[0].through.as_deref(), Some("PostTag"));
    assert_eq!(log[0].foreign_key.as_deref(), Some("userId"));
    assert_eq!(log[1].through.as_deref(), Some("PostTag"));
    assert_eq!(log[1].foreign_key, None);
    assert_eq!(log[1].options.get("timestamps"), Some(&json!(false)));
}

#[test]
fn test_many_to_many_without_through_fails_before_any_call() {
    let fx = Fixture::new();

    let err = declare_relation(RelationRequest::between(
        &fx.user,
        &fx.post,
        RelationKind::BelongsToMany,
    ))
    .unwrap_err();

    assert!(matches!(err, RelaxError::InvalidRequest(_)));
    assert!(fx.calls().is_empty());
}

#[test]
fn test_missing_fields_fail_before_any_call() {
    let fx = Fixture::new();

    let requests = vec![
        RelationRequest::new().with_target(&fx.post).with_kind(RelationKind::HasMany),
        RelationRequest::new().with_source(&fx.user).with_kind(RelationKind::HasMany),
        RelationRequest::new().with_source(&fx.user).with_target(&fx.post),
    ];

    for request in requests {
        let err = declare_relation(request).unwrap_err();
        assert!(matches!(err, RelaxError::InvalidRequest(_)), "got {err:?}");
    }
    assert!(fx.calls().is_empty());
}

#[test]
fn test_blank_kind_is_reported_as_missing() {
    let fx = Fixture::new();

    for tag in ["", "   "] {
        let err = declare_relation(RelationRequest::between(&fx.user, &fx.post, tag)).unwrap_err();
        match err {
            RelaxError::InvalidRequest(msg) => assert_eq!(msg, "type required"),
            other => panic!("expected InvalidRequest for {tag:?}, got {other:?}"),
        }
    }
    assert!(fx.calls().is_empty());
}

#[test]
fn test_unknown_kind_fails_before_any_call() {
    let fx = Fixture::new();

    let err = declare_relation(RelationRequest::between(&fx.user, &fx.post, "hasThing")).unwrap_err();

    assert!(matches!(err, RelaxError::UnknownRelationKind(ref tag) if tag == "hasThing"));
    assert!(err.is_validation());
    assert!(fx.calls().is_empty());
}

#[test]
fn test_plural_only_names_are_singularized_in_trace() {
    let fx = Fixture::new();
    let posts = MockModel {
        name: None,
        plural: Some("Posts"),
        log: Rc::clone(&fx.log),
        reject: None,
    };
    let sink = RecordingSink::new();

    Fixture::declarator(&sink)
        .declare(RelationRequest::between(&fx.user, &posts, RelationKind::HasMany))
        .unwrap();

    assert_eq!(sink.lines(), vec!["Post.belongsTo(User)"]);
}

#[test]
fn test_inverse_failure_keeps_forward_registration() {
    let fx = Fixture::new();
    let post = MockModel {
        name: Some("Post"),
        plural: None,
        log: Rc::clone(&fx.log),
        reject: Some("belongsTo"),
    };
    let sink = RecordingSink::new();

    let err = Fixture::declarator(&sink)
        .declare(RelationRequest::between(&fx.user, &post, RelationKind::HasMany))
        .unwrap_err();

    assert_eq!(err.into_collaborator(), Some(Rejected("belongsTo")));
    assert_eq!(fx.calls(), vec![call("User", "hasMany", "Post")]);
    assert!(sink.events().is_empty());
}

#[test]
fn test_forward_failure_skips_inverse() {
    let fx = Fixture::new();
    let user = MockModel {
        name: Some("User"),
        plural: None,
        log: Rc::clone(&fx.log),
        reject: Some("hasOne"),
    };

    let err = declare_relation(RelationRequest::between(&user, &fx.post, RelationKind::HasOne))
        .unwrap_err();

    assert!(matches!(err, RelaxError::Collaborator(Rejected("hasOne"))));
    assert_eq!(err.to_string(), "rejected hasOne");
    assert!(fx.calls().is_empty());
}

#[test]
fn test_foreign_key_option_overrides_request_key() {
    let fx = Fixture::new();

    declare_relation(
        RelationRequest::between(&fx.user, &fx.post, RelationKind::HasMany)
            .with_foreign_key("userId")
            .with_option("foreignKey", "authorId"),
    )
    .unwrap();

    let log = fx.log.borrow();
    assert_eq!(log[0].foreign_key.as_deref(), Some("authorId"));
    assert_eq!(log[1].foreign_key.as_deref(), Some("authorId"));
}

#[test]
fn test_config_can_disable_inverse_by_default() {
    let fx = Fixture::new();
    let sink = RecordingSink::new();
    let declarator = Declarator::with_sink(
        &sink,
        DeclaratorConfig::new().with_inverse_by_default(false),
    );

    declarator
        .declare(RelationRequest::between(&fx.user, &fx.post, RelationKind::HasMany))
        .unwrap();
    declarator
        .declare(RelationRequest::between(&fx.user, &fx.post, RelationKind::HasOne).with_inverse(true))
        .unwrap();

    assert_eq!(
        fx.calls(),
        vec![
            call("User", "hasMany", "Post"),
            call("User", "hasOne", "Post"),
            call("Post", "belongsTo", "User"),
        ]
    );
}

#[test]
fn test_declare_all_stops_at_first_failure() {
    let fx = Fixture::new();
    let sink = RecordingSink::new();

    let err = Fixture::declarator(&sink)
        .declare_all(vec![
            RelationRequest::between(&fx.user, &fx.post, RelationKind::HasMany),
            RelationRequest::between(&fx.user, &fx.post, "manyToOne"),
            RelationRequest::between(&fx.user, &fx.post, RelationKind::HasOne),
        ])
        .unwrap_err();

    assert!(matches!(err, RelaxError::UnknownRelationKind(_)));
    assert_eq!(fx.calls().len(), 2);
    assert_eq!(sink.lines(), vec!["Post.belongsTo(User)"]);
}
