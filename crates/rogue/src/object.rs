//! The dynamic property object.

use std::{collections::BTreeMap, fmt, result::Result as StdResult};

use serde::{Serialize, Serializer, de::DeserializeOwned, ser::SerializeMap};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    Behavior, Error, Member, Result,
    loader::{Format, parse_document},
};

/// Object populated at runtime with named value and behavior members.
///
/// Value members are read with [`get`](Self::get) and written with [`set`](Self::set).
/// Behavior members are invoked with [`call`](Self::call). A name belongs to exactly
/// one kind at a time: registering a name through [`with_properties`](Self::with_properties)
/// replaces whatever that name held before, whichever kind it was.
#[derive(Clone, Default)]
pub struct RogueObject {
    /// Value members, keyed by name.
    values: BTreeMap<String, Value>,
    /// Behavior members, keyed by name.
    behaviors: BTreeMap<String, Behavior>,
}

impl RogueObject {
    /// Create an empty object with no members.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object into value members.
    pub fn from_json_str(source: &str) -> Result<Self> {
        parse_document(source, Format::Json)
    }

    /// Parse a RON map into value members.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        parse_document(source, Format::Ron)
    }

    /// Parse `source` in the given format.
    pub fn from_str_as(source: &str, format: Format) -> Result<Self> {
        parse_document(source, format)
    }

    /// Register every `(name, member)` pair in iteration order and return the object.
    ///
    /// Behavior initializers become behavior members; everything else becomes (or
    /// overwrites) a value member.
    #[must_use]
    pub fn with_properties<I, K>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = (K, Member)>,
        K: Into<String>,
    {
        self.populate(members);
        self
    }

    /// Borrowed form of [`with_properties`](Self::with_properties).
    pub fn populate<I, K>(&mut self, members: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Member)>,
        K: Into<String>,
    {
        for (name, member) in members {
            self.register(name.into(), member);
        }
        self
    }

    /// Register a single member, evicting any member of the other kind under `name`.
    fn register(&mut self, name: String, member: Member) {
        match member {
            Member::Value(value) => {
                trace!(member = %name, kind = "value", "register member");
                self.behaviors.remove(&name);
                self.values.insert(name, value);
            }
            Member::Behavior(behavior) => {
                trace!(member = %name, kind = "behavior", "register member");
                self.values.remove(&name);
                self.behaviors.insert(name, behavior);
            }
        }
    }

    /// Read the value member `name`.
    pub fn get(&self, name: &str) -> Result<&Value> {
        if let Some(value) = self.values.get(name) {
            return Ok(value);
        }
        Err(self.not_a_value(name))
    }

    /// Mutable access to the value member `name`.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Value> {
        if !self.values.contains_key(name) {
            return Err(self.not_a_value(name));
        }
        self.values
            .get_mut(name)
            .ok_or_else(|| Error::UndefinedMember { name: name.into() })
    }

    /// Read the value member `name` and deserialize it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.get(name)?;
        T::deserialize(value).map_err(|err| Error::Convert {
            name: name.into(),
            message: err.to_string(),
        })
    }

    /// Assign `value` to the value member `name`, creating it when absent.
    ///
    /// Behavior members cannot be reassigned as plain values.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let name = name.into();
        if self.behaviors.contains_key(&name) {
            debug!(member = %name, "refusing value write over behavior member");
            return Err(Error::BehaviorMember { name });
        }
        trace!(member = %name, "set value member");
        self.values.insert(name, value.into());
        Ok(())
    }

    /// Invoke the behavior member `name` with `args` and return its result.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        match self.behaviors.get(name) {
            Some(behavior) => {
                trace!(member = %name, argc = args.len(), "invoke behavior");
                Ok(behavior.invoke(args))
            }
            None => {
                debug!(member = %name, ?args, "no behavior member");
                Err(Error::Argument {
                    name: name.into(),
                    args: args.to_vec(),
                })
            }
        }
    }

    /// Error for a value lookup that missed the value table.
    fn not_a_value(&self, name: &str) -> Error {
        if self.behaviors.contains_key(name) {
            Error::BehaviorMember { name: name.into() }
        } else {
            debug!(member = %name, "undefined member");
            Error::UndefinedMember { name: name.into() }
        }
    }

    /// Whether `name` is registered as either kind.
    pub fn contains(&self, name: &str) -> bool {
        self.is_value(name) || self.is_behavior(name)
    }

    /// Whether `name` is a value member.
    pub fn is_value(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether `name` is a behavior member.
    pub fn is_behavior(&self, name: &str) -> bool {
        self.behaviors.contains_key(name)
    }

    /// Names of value members in sorted order.
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Names of behavior members in sorted order.
    pub fn behavior_names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    /// Total number of members of both kinds.
    pub fn len(&self) -> usize {
        self.values.len() + self.behaviors.len()
    }

    /// Whether the object has no members.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.behaviors.is_empty()
    }

    /// Snapshot of the value members as a JSON object. Behaviors are skipped.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Value::Object(map)
    }
}

/// Build a [`RogueObject`] populated with `members` in one call.
pub fn obj<I, K>(members: I) -> RogueObject
where
    I: IntoIterator<Item = (K, Member)>,
    K: Into<String>,
{
    RogueObject::new().with_properties(members)
}

impl<K: Into<String>> Extend<(K, Member)> for RogueObject {
    fn extend<T: IntoIterator<Item = (K, Member)>>(&mut self, iter: T) {
        self.populate(iter);
    }
}

impl<K: Into<String>> FromIterator<(K, Member)> for RogueObject {
    fn from_iter<T: IntoIterator<Item = (K, Member)>>(iter: T) -> Self {
        obj(iter)
    }
}

impl From<Map<String, Value>> for RogueObject {
    fn from(map: Map<String, Value>) -> Self {
        obj(map.into_iter().map(|(k, v)| (k, Member::Value(v))))
    }
}

impl Serialize for RogueObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Debug for RogueObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RogueObject")
            .field("values", &self.values)
            .field("behaviors", &self.behaviors.keys().collect::<Vec<_>>())
            .finish()
    }
}
