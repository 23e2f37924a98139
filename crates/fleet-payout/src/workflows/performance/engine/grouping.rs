use super::super::domain::RawPerformanceRecord;
use std::collections::HashMap;

/// Records sharing a driver name, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverGroup {
    pub driver_name: String,
    pub rows: Vec<RawPerformanceRecord>,
}

/// Partition by exact `driver_full_name`, keeping groups in order of first appearance.
pub fn group_by_driver(records: &[RawPerformanceRecord]) -> Vec<DriverGroup> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<DriverGroup> = Vec::new();

    for record in records {
        let name = record.driver_full_name.as_str();
        let index = *positions.entry(name).or_insert_with(|| {
            groups.push(DriverGroup {
                driver_name: name.to_string(),
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[index].rows.push(record.clone());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_follow_first_appearance() {
        let records = vec![
            RawPerformanceRecord::new("Meera"),
            RawPerformanceRecord::new("Arjun"),
            RawPerformanceRecord::new("Meera"),
            RawPerformanceRecord::new("Zoya"),
            RawPerformanceRecord::new("Arjun"),
        ];

        let groups = group_by_driver(&records);

        let names: Vec<&str> = groups.iter().map(|g| g.driver_name.as_str()).collect();
        assert_eq!(names, vec!["Meera", "Arjun", "Zoya"]);
        assert_eq!(groups[0].rows.len(), 2);
        assert_eq!(groups[1].rows.len(), 2);
        assert_eq!(groups[2].rows.len(), 1);
    }

    #[test]
    fn names_match_exactly() {
        let records = vec![
            RawPerformanceRecord::new("meera"),
            RawPerformanceRecord::new("Meera"),
            RawPerformanceRecord::new("Meera "),
        ];

        assert_eq!(group_by_driver(&records).len(), 3);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_driver(&[]).is_empty());
    }
}
