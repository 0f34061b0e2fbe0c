//! Projection of optimizer placements onto drawable parts.
//!
//! [`project`] is the only entry point. It is pure and total: it never fails,
//! never mutates its inputs, and always returns exactly one [`Part`] per
//! [`Placement`], in placement order.

use log::trace;

use sheetcut_core::{
    element::ElementSpec,
    palette,
    placement::{Part, Placement},
};

/// Converts placements into colored parts carrying their category icon.
///
/// Each placement is matched to the element with the same id. A placement
/// without a matching element (stale or missing id) is colored like an
/// element with no category. A placement without an id gets its zero-based
/// index as the part id.
///
/// # Examples
///
/// ```
/// use sheetcut::layout::project;
/// use sheetcut_core::{
///     element::{Category, ElementId, ElementSpec},
///     placement::Placement,
/// };
///
/// let elements = [ElementSpec::new(ElementId::new(1), 200.0, 100.0).with_category(Category::Door)];
/// let placements = [Placement::new(ElementId::new(1), 10.0, 20.0, 200.0, 100.0)];
///
/// let parts = project(&placements, &elements);
/// assert_eq!(parts.len(), 1);
/// assert_eq!(parts[0].id(), 1);
/// assert_eq!(parts[0].color().to_hex(), "#90caf9");
/// ```
pub fn project(placements: &[Placement], elements: &[ElementSpec]) -> Vec<Part> {
    trace!(placements = placements.len(), elements = elements.len(); "Projecting placements");

    placements
        .iter()
        .enumerate()
        .map(|(index, placement)| {
            let category = placement.id().and_then(|id| {
                elements
                    .iter()
                    .find(|element| element.id() == id)
                    .and_then(ElementSpec::category)
            });

            let id = placement
                .id()
                .map_or(index as u64, |element_id| element_id.value());

            let style = palette::style_for(category);
            Part::new(
                id,
                placement.x(),
                placement.y(),
                placement.width(),
                placement.height(),
                style.fill(),
            )
            .with_icon(style.icon())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use sheetcut_core::element::{Category, ElementId};

    use super::*;

    fn element(id: u64, category: Option<Category>) -> ElementSpec {
        let mut element = ElementSpec::new(ElementId::new(id), 100.0, 50.0);
        element.set_category(category);
        element
    }

    #[test]
    fn test_project_door_scenario() {
        let placements = [Placement::new(ElementId::new(1), 10.0, 20.0, 200.0, 100.0)];
        let elements =
            [ElementSpec::new(ElementId::new(1), 200.0, 100.0).with_category(Category::Door)];

        let parts = project(&placements, &elements);

        assert_eq!(parts.len(), 1);
        let part = &parts[0];
        assert_eq!(part.id(), 1);
        assert_eq!(part.x(), 10.0);
        assert_eq!(part.y(), 20.0);
        assert_eq!(part.width(), 200.0);
        assert_eq!(part.height(), 100.0);
        assert_eq!(part.color().to_hex(), "#90caf9");
        assert_eq!(part.icon(), "door_front");
    }

    #[test]
    fn test_project_multiple_categories_in_order() {
        let placements = [
            Placement::new(ElementId::new(2), 30.0, 40.0, 50.0, 50.0),
            Placement::new(ElementId::new(1), 10.0, 20.0, 200.0, 100.0),
        ];
        let elements = [
            element(1, Some(Category::Door)),
            element(2, Some(Category::Leg)),
        ];

        let parts = project(&placements, &elements);

        assert_eq!(parts[0].id(), 2);
        assert_eq!(parts[0].color().to_hex(), "#a5d6a7");
        assert_eq!(parts[1].id(), 1);
        assert_eq!(parts[1].color().to_hex(), "#90caf9");
    }

    #[test]
    fn test_project_unmatched_id_uses_default_color() {
        let placements = [Placement::new(ElementId::new(999), 0.0, 0.0, 100.0, 50.0)];
        let elements = [element(1, Some(Category::Shelf))];

        let parts = project(&placements, &elements);

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].id(), 999);
        assert_eq!(parts[0].color().to_hex(), "#b0bec5");
        assert_eq!(parts[0].icon(), "crop_square");
    }

    #[test]
    fn test_project_missing_id_uses_index() {
        let placements = [
            Placement::new(ElementId::new(7), 0.0, 0.0, 10.0, 10.0),
            Placement::new(None, 10.0, 0.0, 10.0, 10.0),
        ];

        let parts = project(&placements, &[element(7, Some(Category::Accessory))]);

        assert_eq!(parts[0].id(), 7);
        assert_eq!(parts[1].id(), 1);
        assert_eq!(parts[1].color().to_hex(), "#b0bec5");
    }

    #[test]
    fn test_project_empty_placements() {
        let elements = [element(1, Some(Category::Door))];
        assert!(project(&[], &elements).is_empty());
        assert!(project(&[], &[]).is_empty());
    }

    fn category_strategy() -> impl Strategy<Value = Option<Category>> {
        prop_oneof![
            Just(None::<Category>),
            proptest::sample::select(Category::ALL.to_vec()).prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn prop_project_preserves_length_and_colors(
            categories in proptest::collection::vec(category_strategy(), 0..8),
            ids in proptest::collection::vec(proptest::option::of(0u64..12), 0..16),
        ) {
            let elements: Vec<ElementSpec> = categories
                .iter()
                .enumerate()
                .map(|(index, category)| element(index as u64, *category))
                .collect();
            let placements: Vec<Placement> = ids
                .iter()
                .map(|id| Placement::new(id.map(ElementId::new), 0.0, 0.0, 1.0, 1.0))
                .collect();

            let parts = project(&placements, &elements);
            prop_assert_eq!(parts.len(), placements.len());

            for (placement, part) in placements.iter().zip(&parts) {
                let category = placement
                    .id()
                    .and_then(|id| elements.iter().find(|e| e.id() == id))
                    .and_then(ElementSpec::category);
                prop_assert_eq!(part.color().to_hex(), palette::style_for(category).fill_hex());
                prop_assert_eq!(part.icon(), palette::style_for(category).icon());
            }
        }
    }
}
