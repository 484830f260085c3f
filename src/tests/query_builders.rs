#[cfg(test)]
mod test {
    use crate::{Filter, MeshQuery, OrderBy};

    #[test]
    fn equality_filters_render_plain_objects() {
        assert_eq!(Filter::eq("name", "Bo").to_wire(), r#"{"name":"Bo"}"#);
        assert_eq!(Filter::eq("age", 5).to_wire(), r#"{"age":5}"#);
    }

    #[test]
    fn comparison_filters_render_operator_objects() {
        assert_eq!(Filter::gt("age", 21).to_wire(), r#"{"age":{"$gt":21}}"#);
        assert_eq!(Filter::lte("age", 65).to_wire(), r#"{"age":{"$lte":65}}"#);
        assert_eq!(Filter::ne("name", "Bo").to_wire(), r#"{"name":{"$ne":"Bo"}}"#);
    }

    #[test]
    fn combinators_nest_their_clauses() {
        let filter = Filter::and([Filter::eq("name", "Bo"), Filter::gt("age", 3)]);
        assert_eq!(
            filter.to_wire(),
            r#"{"$and":[{"name":"Bo"},{"age":{"$gt":3}}]}"#
        );

        let filter = Filter::or([Filter::eq("age", 1), Filter::eq("age", 2)]);
        assert_eq!(filter.to_wire(), r#"{"$or":[{"age":1},{"age":2}]}"#);
    }

    #[test]
    fn ordering_preserves_field_precedence() {
        // Not alphabetical; sort precedence follows the order fields were added.
        let order = OrderBy::desc("zip").then_asc("age");
        assert_eq!(order.to_wire(), r#"{"zip":-1,"age":1}"#);
    }

    #[test]
    fn query_pairs_use_wire_parameter_names() {
        let query = MeshQuery::new()
            .filter(Filter::eq("name", "Bo"))
            .order_by(OrderBy::asc("age"))
            .page(3)
            .page_size(25);

        let pairs = query.to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("filter", r#"{"name":"Bo"}"#.to_string()),
                ("orderby", r#"{"age":1}"#.to_string()),
                ("page", "3".to_string()),
                ("pageSize", "25".to_string()),
            ]
        );
    }

    #[test]
    fn empty_queries_produce_no_pairs() {
        assert!(MeshQuery::new().to_pairs().is_empty());
    }
}
