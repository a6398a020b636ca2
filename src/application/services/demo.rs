//! Demo walkthrough
//!
//! Produces the illustrative text for the composite, evaluator and
//! iterator mechanisms as plain lines, so the CLI only prints them.

use tracing::instrument;

use crate::application::services::{IterationService, TreeService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{Node, Tree};

/// One titled block of demo output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
}

impl Section {
    fn new(title: &str, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            lines,
        }
    }
}

pub struct DemoService {
    settings: Settings,
    trees: TreeService,
    iteration: IterationService,
}

impl DemoService {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            trees: TreeService::new(),
            iteration: IterationService::new(),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn run(&self) -> ApplicationResult<Vec<Section>> {
        Ok(vec![
            self.composite()?,
            self.evaluators()?,
            self.iterator()?,
        ])
    }

    fn composite(&self) -> ApplicationResult<Section> {
        let simple = Tree::new(Node::leaf());
        let mut tree = self.trees.parse(&self.settings.tree.sample)?;

        let mut lines = vec![
            "Client: I've got a simple component:".to_string(),
            format!("RESULT: {}", simple.operation()),
            String::new(),
            "Client: Now I've got a composite tree:".to_string(),
            format!("RESULT: {}", tree.operation()),
            String::new(),
            "Client: I don't need to check the node kinds even when managing the tree:".to_string(),
        ];
        self.trees.graft_leaf(tree.root_mut());
        lines.push(format!("RESULT: {}", tree.operation()));

        Ok(Section::new("Composite", lines))
    }

    fn evaluators(&self) -> ApplicationResult<Section> {
        let tree = self.trees.parse(&self.settings.tree.sample)?;
        let reports = self.trees.visit(&tree, &self.settings.visitor.labels)?;

        let mut lines = Vec::new();
        for (idx, report) in reports.into_iter().enumerate() {
            if idx == 0 {
                lines.push("The client code works with all evaluators via the base interface:".to_string());
            } else {
                lines.push(String::new());
                lines.push("The same client code works with a different evaluator:".to_string());
            }
            lines.extend(report);
        }

        let stats = self.trees.stats(&tree)?;
        lines.push(String::new());
        lines.push(format!(
            "NodeCounter: {} leaves, {} branches",
            stats.leaves, stats.branches
        ));

        Ok(Section::new("Evaluator", lines))
    }

    fn iterator(&self) -> ApplicationResult<Section> {
        let lines = self.iteration.walkthrough(&self.settings.iterator.items)?;
        Ok(Section::new("Iterator", lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_run_then_three_sections() {
        let sections = DemoService::new(Settings::default()).run().unwrap();
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Composite", "Evaluator", "Iterator"]);
    }

    #[test]
    fn given_default_settings_when_run_then_composite_grafts_leaf() {
        let sections = DemoService::new(Settings::default()).run().unwrap();
        let composite = &sections[0].lines;
        assert_eq!(composite[1], "RESULT: Leaf");
        assert_eq!(composite[4], "RESULT: Branch(Branch(Leaf+Leaf)+Branch(Leaf))");
        assert_eq!(
            composite.last().unwrap(),
            "RESULT: Branch(Branch(Leaf+Leaf)+Branch(Leaf)+Leaf)"
        );
    }

    #[test]
    fn given_default_settings_when_run_then_each_label_reported() {
        let sections = DemoService::new(Settings::default()).run().unwrap();
        let evaluator = &sections[1].lines;
        assert!(evaluator.contains(&"Leaf + KindLabeler1".to_string()));
        assert!(evaluator.contains(&"Leaf + KindLabeler2".to_string()));
        assert_eq!(evaluator.last().unwrap(), "NodeCounter: 3 leaves, 3 branches");
    }

    #[test]
    fn given_invalid_sample_when_run_then_error() {
        let mut settings = Settings::default();
        settings.tree.sample = "Branch(Leaf".to_string();
        assert!(DemoService::new(settings).run().is_err());
    }
}
