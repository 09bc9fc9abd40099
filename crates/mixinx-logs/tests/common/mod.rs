use mixinx_core::{ConstructTree, NodeId, ResourceType};
use serde_json::json;

pub const DISTRIBUTION_TYPE: &str = "AWS::CloudFront::Distribution";
pub const DISTRIBUTION_ARN: &str = "arn:aws:cloudfront::123456789012:distribution/EDFDVBD6EXAMPLE";

/// Handles into a stack holding a log-emitting resource and every kind of target
#[allow(dead_code)]
pub struct LogsStack {
    pub tree: ConstructTree,
    pub stack: NodeId,
    /// `Stack/Distribution/Resource`, carries an explicit ARN
    pub distribution: NodeId,
    pub bucket: NodeId,
    pub log_group: NodeId,
    pub stream: NodeId,
    pub key: NodeId,
}

/// `App -> Stack -> [Distribution -> Resource, LogsBucket, AccessLogs, Stream, Key]`
#[allow(dead_code)]
pub fn logs_stack() -> LogsStack {
    let mut tree = ConstructTree::new("App").unwrap();
    let stack = tree.add_child(tree.root(), "Stack").unwrap();

    let l2 = tree.add_child(stack, "Distribution").unwrap();
    let distribution = tree
        .add_resource(l2, "Resource", ResourceType::new("CfnDistribution", DISTRIBUTION_TYPE))
        .unwrap();
    tree.set_property(distribution, "arn", json!(DISTRIBUTION_ARN))
        .unwrap();

    let bucket = tree
        .add_resource(stack, "LogsBucket", ResourceType::new("CfnBucket", "AWS::S3::Bucket"))
        .unwrap();
    let log_group = tree
        .add_resource(stack, "AccessLogs", ResourceType::new("CfnLogGroup", "AWS::Logs::LogGroup"))
        .unwrap();
    let stream = tree
        .add_resource(
            stack,
            "Stream",
            ResourceType::new("CfnDeliveryStream", "AWS::KinesisFirehose::DeliveryStream"),
        )
        .unwrap();
    let key = tree
        .add_resource(stack, "Key", ResourceType::new("CfnKey", "AWS::KMS::Key"))
        .unwrap();

    LogsStack {
        tree,
        stack,
        distribution,
        bucket,
        log_group,
        stream,
        key,
    }
}

/// A handle that belongs to no node of a small tree
#[allow(dead_code)]
pub fn foreign_handle() -> NodeId {
    let mut other = ConstructTree::new("Other").unwrap();
    let mut last = other.root();
    for i in 0..64 {
        last = other.add_child(last, format!("n{}", i)).unwrap();
    }
    last
}

/// Count nodes under `scope` whose resource type matches `type_name`
#[allow(dead_code)]
pub fn count_of_type(tree: &ConstructTree, scope: NodeId, type_name: &str) -> usize {
    tree.find_all(scope)
        .unwrap()
        .into_iter()
        .filter(|id| tree.resource_type(*id).is_some_and(|ty| ty.matches(type_name)))
        .count()
}
