/// Maximum number of activations requested from the store.
pub const RESULT_LIMIT: usize = 300;

pub const SELECTED_VARIABLES: [&str; 11] = [
    "activation",
    "label",
    "year",
    "month",
    "requestTime",
    "interventionTime",
    "districtLabel",
    "hospitalLabel",
    "emergencyType",
    "districtWikidataLink",
    "hospitalWikidataLink",
];

// Label and sameAs lookups sit in separate OPTIONAL blocks so a district or
// hospital without one of them still yields its row.
const ACTIVATIONS_QUERY: &str = r#"
PREFIX samur: <http://samur.linkeddata.madrid.es/ontology#>
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX schema: <http://schema.org/>

SELECT ?activation ?label ?year ?month ?requestTime ?interventionTime ?districtLabel ?hospitalLabel ?emergencyType ?districtWikidataLink ?hospitalWikidataLink
WHERE {
  ?activation a samur:Activation ;
              rdfs:label ?label ;
              samur:hasYear ?year ;
              samur:hasMonth ?month ;
              samur:hasRequestTime ?requestTime ;
              samur:hasInterventionTime ?interventionTime ;
              samur:hasEmergencyType ?emergencyType ;
              samur:hasDistrict ?district ;
              samur:hasHospital ?hospital .

  OPTIONAL { ?district rdfs:label ?districtLabel }
  OPTIONAL { ?hospital rdfs:label ?hospitalLabel }

  OPTIONAL { ?district owl:sameAs ?districtWikidataLink }
  OPTIONAL { ?hospital owl:sameAs ?hospitalWikidataLink }
}
ORDER BY DESC(?year) DESC(?month) DESC(?requestTime)
LIMIT 300
"#;

/// The latest activations with their district and hospital details.
pub fn activations_query() -> &'static str {
    ACTIVATIONS_QUERY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_selects_every_projected_variable() {
        let query = activations_query();
        let select_line = query
            .lines()
            .find(|line| line.starts_with("SELECT"))
            .unwrap();
        for variable in SELECTED_VARIABLES {
            assert!(
                select_line.contains(&format!("?{} ", variable))
                    || select_line.ends_with(&format!("?{}", variable)),
                "missing ?{}",
                variable
            );
        }
    }

    #[test]
    fn test_district_and_hospital_lookups_are_optional() {
        let query = activations_query();
        assert_eq!(query.matches("OPTIONAL {").count(), 4);
        assert!(query.contains("OPTIONAL { ?district rdfs:label ?districtLabel }"));
        assert!(query.contains("OPTIONAL { ?hospital owl:sameAs ?hospitalWikidataLink }"));
    }

    #[test]
    fn test_ordering_and_limit() {
        let query = activations_query();
        assert!(query.contains("ORDER BY DESC(?year) DESC(?month) DESC(?requestTime)"));
        assert!(query.contains(&format!("LIMIT {}", RESULT_LIMIT)));
    }
}
