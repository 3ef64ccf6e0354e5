//! Pure mapping from a membership API group to a search document.

use groups_indexer_shared::{GroupProfile, GroupSearchDocument, Reference, SourceReference};

/// Convert a group profile into its search document.
///
/// Deterministic and free of I/O. The image link is copied through as-is;
/// re-hosting it is the asset migrator's job.
pub fn transform(profile: &GroupProfile) -> GroupSearchDocument {
    let leader = &profile.main_leader;

    let custom_fields = profile
        .custom_pulldown_fields
        .iter()
        .map(|field| {
            (
                field.name.clone(),
                Reference::new(field.selection.id.to_string(), field.selection.label.clone()),
            )
        })
        .collect();

    GroupSearchDocument {
        id: profile.id,
        name: profile.name.clone(),
        description: profile.description.clone(),
        image_url: profile.image_url.clone(),
        leader_id: leader.id,
        leader_name: format!("{} {}", leader.first_name, abbreviate_name(&leader.last_name)),
        leader_email: leader.email.clone(),
        location_city: profile
            .addresses
            .first()
            .and_then(|address| address.city.clone()),
        current_members: profile.current_members,
        group_capacity: profile.group_capacity,
        childcare_provided: profile.childcare_provided,
        listed: profile.listed,
        public_search_listed: profile.public_search_listed,
        active: profile.active,
        custom_fields,
        campus: adapt_reference(&profile.campus),
        group_type: adapt_reference(&profile.group_type),
        department: adapt_reference(&profile.department),
        area: adapt_reference(&profile.area),
        meeting_day: adapt_reference(&profile.meeting_day),
        meeting_time: adapt_reference(&profile.meeting_time),
    }
}

fn adapt_reference(reference: &SourceReference) -> Reference {
    Reference::new(reference.id.to_string(), reference.name.clone())
}

/// Reduce a name to its initials: `"van der Berg"` becomes `"v.d.B."`.
pub fn abbreviate_name(name: &str) -> String {
    name.split(' ')
        .filter_map(|token| token.chars().next())
        .map(|initial| format!("{}.", initial))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use groups_indexer_shared::{
        Address, CustomPulldownFieldValue, InteractionType, Leader, PulldownSelection,
    };

    /// A public, active, community group with an image.
    pub(crate) fn sample_profile(id: i64) -> GroupProfile {
        GroupProfile {
            id,
            name: format!("Group {}", id),
            description: Some("Weekly meetup".to_string()),
            image_url: Some(format!("https://cdn.example.org/images/{}.jpg", id)),
            main_leader: Leader {
                id: 100 + id,
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: Some("jane@example.org".to_string()),
            },
            current_members: 8,
            group_capacity: Some(12),
            childcare_provided: true,
            listed: true,
            public_search_listed: true,
            active: true,
            interaction_type: InteractionType::MembersInteract,
            addresses: vec![Address {
                city: Some("Springfield".to_string()),
                ..Default::default()
            }],
            campus: SourceReference::new(1, "Main Campus"),
            group_type: SourceReference::new(3, "Community Groups"),
            department: SourceReference::new(4, "Adults"),
            area: SourceReference::new(5, "North"),
            meeting_day: SourceReference::new(2, "Tuesday"),
            meeting_time: SourceReference::new(6, "Evening"),
            custom_pulldown_fields: vec![CustomPulldownFieldValue {
                name: "udf_1".to_string(),
                label: "Life Stage".to_string(),
                selection: PulldownSelection {
                    id: 5,
                    label: "Young Adults".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_abbreviate_single_token() {
        assert_eq!(abbreviate_name("Doe"), "D.");
    }

    #[test]
    fn test_abbreviate_multiple_tokens() {
        assert_eq!(abbreviate_name("van der Berg"), "v.d.B.");
        assert_eq!(abbreviate_name("Smith  Jones"), "S.J.");
        assert_eq!(abbreviate_name("Émile"), "É.");
        assert_eq!(abbreviate_name(""), "");
    }

    #[test]
    fn test_transform_maps_all_fields() {
        let profile = sample_profile(12);

        let doc = transform(&profile);

        assert_eq!(doc.id, 12);
        assert_eq!(doc.name, "Group 12");
        assert_eq!(doc.leader_id, 112);
        assert_eq!(doc.leader_name, "Jane D.");
        assert_eq!(doc.leader_email.as_deref(), Some("jane@example.org"));
        assert_eq!(doc.location_city.as_deref(), Some("Springfield"));
        assert_eq!(doc.image_url.as_deref(), Some("https://cdn.example.org/images/12.jpg"));
        assert_eq!(doc.group_capacity, Some(12));
        assert!(doc.childcare_provided && doc.listed && doc.public_search_listed && doc.active);
        assert_eq!(doc.group_type, Reference::new("3", "Community Groups"));
        assert_eq!(doc.meeting_day, Reference::new("2", "Tuesday"));
        assert_eq!(doc.meeting_time, Reference::new("6", "Evening"));
        assert_eq!(
            doc.custom_fields.get("udf_1"),
            Some(&Reference::new("5", "Young Adults"))
        );
    }

    #[test]
    fn test_transform_without_addresses_or_capacity() {
        let mut profile = sample_profile(3);
        profile.addresses.clear();
        profile.group_capacity = None;

        let doc = transform(&profile);

        assert!(doc.location_city.is_none());
        assert!(doc.is_capacity_unlimited());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let profile = sample_profile(9);

        let first = serde_json::to_string(&transform(&profile)).unwrap();
        let second = serde_json::to_string(&transform(&profile)).unwrap();

        assert_eq!(first, second);
    }
}
