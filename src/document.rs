//! Plain-data scene description: animators, object properties and bindings.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    rc::Rc,
};

use crate::{
    animator::registry::AnimatorRegistry,
    binding::model::AnimatorBinding,
    binding::property::{AnimatableProperty, PropertyKey},
    binding::table::BindingTable,
    foundation::core::{AnimatorId, ObjectId},
    foundation::error::{AnimatorError, AnimatorResult},
    scene::store::{PropertyStore, SceneProperties},
    session::AnimationSession,
    signal::source::Source,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub animators: Vec<AnimatorSpec>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimatorSpec {
    pub name: String,
    pub source: Source,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObjectSpec {
    pub id: ObjectId,
    #[serde(default)]
    pub properties: BTreeMap<AnimatableProperty, f32>,
    #[serde(default)]
    pub bindings: Vec<BindingSpec>,
}

/// Binding by animator name. Omitted values fall back to the property's
/// default range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BindingSpec {
    pub property: AnimatableProperty,
    pub animator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_at_0: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_at_1: Option<f32>,
}

/// Live objects built from a [`SceneDocument`].
#[derive(Debug)]
pub struct LoadedScene {
    pub registry: Rc<AnimatorRegistry>,
    pub bindings: Rc<BindingTable>,
    pub store: Rc<SceneProperties>,
}

impl LoadedScene {
    pub fn into_session(self) -> AnimationSession<SceneProperties> {
        AnimationSession::new(self.registry, self.bindings, self.store)
    }
}

impl SceneDocument {
    pub fn from_json(json: &str) -> AnimatorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> AnimatorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> AnimatorResult<()> {
        let mut names = BTreeSet::new();
        for spec in &self.animators {
            if !names.insert(spec.name.as_str()) {
                return Err(AnimatorError::validation(format!(
                    "duplicate animator name '{}'",
                    spec.name
                )));
            }
            spec.source.validate().map_err(|e| {
                AnimatorError::validation(format!("animator '{}': {e}", spec.name))
            })?;
        }

        let mut objects = BTreeSet::new();
        for object in &self.objects {
            if !objects.insert(object.id) {
                return Err(AnimatorError::validation(format!(
                    "duplicate object id {}",
                    object.id.0
                )));
            }
            let mut bound = BTreeSet::new();
            for binding in &object.bindings {
                if !names.contains(binding.animator.as_str()) {
                    return Err(AnimatorError::validation(format!(
                        "{} binds {} to unknown animator '{}'",
                        object.id, binding.property, binding.animator
                    )));
                }
                if !bound.insert(binding.property) {
                    return Err(AnimatorError::validation(format!(
                        "{} binds {} more than once",
                        object.id, binding.property
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build a registry, an attached binding table and a property store.
    #[tracing::instrument(skip(self), fields(animators = self.animators.len(), objects = self.objects.len()))]
    pub fn load(&self) -> AnimatorResult<LoadedScene> {
        self.validate()?;

        let registry = Rc::new(AnimatorRegistry::new());
        let bindings = BindingTable::attached(&registry);
        let store = Rc::new(SceneProperties::new());

        let mut ids: HashMap<&str, AnimatorId> = HashMap::new();
        for spec in &self.animators {
            let id = registry.create(spec.name.clone(), spec.source)?;
            ids.insert(spec.name.as_str(), id);
        }

        for object in &self.objects {
            for (&property, &value) in &object.properties {
                store.set_value(PropertyKey::new(object.id, property), value);
            }
            for spec in &object.bindings {
                let animator_id = ids.get(spec.animator.as_str()).copied().ok_or_else(|| {
                    AnimatorError::validation(format!("unknown animator '{}'", spec.animator))
                })?;
                let (d0, d1) = spec.property.default_range();
                let binding = AnimatorBinding::new(
                    animator_id,
                    spec.value_at_0.unwrap_or(d0),
                    spec.value_at_1.unwrap_or(d1),
                );
                bindings.bind_or_update(PropertyKey::new(object.id, spec.property), binding)?;
            }
        }

        tracing::debug!(bindings = bindings.len(), "scene document loaded");
        Ok(LoadedScene {
            registry,
            bindings,
            store,
        })
    }

    /// Export live state back to plain data. Bindings whose animator no longer
    /// exists are skipped.
    pub fn capture(
        registry: &AnimatorRegistry,
        bindings: &BindingTable,
        store: &SceneProperties,
    ) -> AnimatorResult<Self> {
        let animators = registry.get_all();
        let mut names: HashMap<AnimatorId, &str> = HashMap::new();
        for animator in &animators {
            if names.values().any(|n| *n == animator.name) {
                return Err(AnimatorError::validation(format!(
                    "animator name '{}' is not unique; bindings cannot reference it",
                    animator.name
                )));
            }
            names.insert(animator.id, animator.name.as_str());
        }

        let mut objects: BTreeMap<ObjectId, ObjectSpec> = BTreeMap::new();
        for (key, value) in store.snapshot() {
            object_entry(&mut objects, key.object)
                .properties
                .insert(key.property, value);
        }
        for (key, binding) in bindings.bindings() {
            let Some(name) = names.get(&binding.animator_id) else {
                continue;
            };
            object_entry(&mut objects, key.object).bindings.push(BindingSpec {
                property: key.property,
                animator: (*name).to_string(),
                value_at_0: Some(binding.value_at_0),
                value_at_1: Some(binding.value_at_1),
            });
        }

        Ok(Self {
            animators: animators
                .iter()
                .map(|a| AnimatorSpec {
                    name: a.name.clone(),
                    source: a.source,
                })
                .collect(),
            objects: objects.into_values().collect(),
        })
    }
}

fn object_entry(objects: &mut BTreeMap<ObjectId, ObjectSpec>, id: ObjectId) -> &mut ObjectSpec {
    objects.entry(id).or_insert_with(|| ObjectSpec {
        id,
        properties: BTreeMap::new(),
        bindings: Vec::new(),
    })
}

#[cfg(test)]
#[path = "../tests/unit/document/document.rs"]
mod tests;
