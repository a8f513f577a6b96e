mod common;

use common::{dt, export, line, options, sample_document};
use xer_tool::{Constraint, Document, Field, Record};

fn ids<T>(items: Vec<&T>, key: impl Fn(&T) -> Option<i64>) -> Vec<i64> {
    items.into_iter().filter_map(key).collect()
}

#[test]
fn task_navigates_to_its_parents() {
    let doc = sample_document();
    let review = doc.task(1003).unwrap();
    assert_eq!(review.project(&doc).unwrap().proj_short_name.as_deref(), Some("DEMO"));
    assert_eq!(review.wbs(&doc).unwrap().wbs_short_name.as_deref(), Some("DES"));
    assert_eq!(review.calendar(&doc).unwrap().clndr_id.get(), Some(1));
    assert_eq!(review.primary_resource(&doc).unwrap().rsrc_id.get(), Some(500));
}

#[test]
fn unset_and_dangling_keys_resolve_to_none() {
    let doc = sample_document();
    let build = doc.task(1002).unwrap();
    assert!(build.wbs(&doc).is_none());
    assert!(build.primary_resource(&doc).is_none());

    let handover = doc.task(1004).unwrap();
    assert_eq!(handover.clndr_id, Field::Value(99));
    assert!(handover.calendar(&doc).is_none());
}

#[test]
fn task_children_come_back_in_table_order() {
    let doc = sample_document();
    let review = doc.task(1003).unwrap();
    assert_eq!(ids(review.assignments(&doc), |a| a.taskrsrc_id.get()), [700]);
    assert_eq!(review.activity_codes(&doc).len(), 2);
    assert_eq!(ids(review.predecessors(&doc), |p| p.task_pred_id.get()), [1]);
    assert_eq!(ids(review.successors(&doc), |p| p.task_pred_id.get()), [2, 3]);

    let handover = doc.task(1004).unwrap();
    assert!(handover.successors(&doc).is_empty());
    assert_eq!(ids(handover.predecessors(&doc), |p| p.pred_task_id.get()), [1003, 1002]);
}

#[test]
fn task_steps_come_from_taskproc() {
    let text = export(&[
        line("%T", &["TASK"]),
        line("%F", &["task_id", "task_code"]),
        line("%R", &["1", "A1"]),
        line("%R", &["2", "A2"]),
        line("%T", &["TASKPROC"]),
        line("%F", &["proc_id", "task_id", "proj_id", "seq_num", "proc_name"]),
        line("%R", &["90", "1", "100", "10", "Pour"]),
        line("%R", &["91", "2", "100", "10", "Strip"]),
        line("%R", &["92", "1", "100", "20", "Cure"]),
        line("%E", &[]),
    ]);
    let doc = Document::parse_with(&text, options()).unwrap();
    let pour = doc.task(1).unwrap();
    let names: Vec<&str> = pour.steps(&doc).iter().filter_map(|step| step.get("proc_name")).collect();
    assert_eq!(names, ["Pour", "Cure"]);
    assert_eq!(pour.steps(&doc)[1].primary_key(), Some(92));

    // The shared fixture carries no TASKPROC table.
    let sample = sample_document();
    assert!(sample.task(1003).unwrap().steps(&sample).is_empty());
}

#[test]
fn durations_use_the_task_calendar() {
    let doc = sample_document();
    let review = doc.task(1003).unwrap();
    assert_eq!(review.hours_per_day(&doc), 8.0);
    assert_eq!(review.duration_in_days(&doc), Some(2.0));
    assert_eq!(review.total_float_days(&doc), Some(1.0));
    assert_eq!(review.free_float_days(&doc), Some(0.0));

    // Calendar 2 exports a zero day length.
    let build = doc.task(1002).unwrap();
    assert_eq!(build.hours_per_day(&doc), 8.0);
    assert_eq!(build.remaining_duration_in_days(&doc), Some(1.5));
    assert_eq!(build.total_float_days(&doc), None);

    let handover = doc.task(1004).unwrap();
    assert_eq!(handover.hours_per_day(&doc), 8.0);
    assert_eq!(handover.duration_in_days(&doc), Some(2.5));
}

#[test]
fn dates_and_constraints() {
    let doc = sample_document();
    let kickoff = doc.task(1001).unwrap();
    assert_eq!(kickoff.start_date(), Some(dt(2025, 1, 6, 8, 0)));

    let review = doc.task(1003).unwrap();
    assert_eq!(review.start_date(), Some(dt(2025, 1, 9, 8, 0)));
    assert_eq!(review.end_date(), Some(dt(2025, 1, 10, 17, 0)));
    assert_eq!(
        review.constraint(),
        Some(Constraint {
            kind: "CS_MSO".to_string(),
            date: dt(2025, 1, 9, 8, 0),
        })
    );
    assert!(review.secondary_constraint().is_none());

    // Constraint type without a date.
    assert!(doc.task(1002).unwrap().constraint().is_none());
    assert!(doc.task(1004).unwrap().end_date().is_none());
}

#[test]
fn project_lists_its_members() {
    let doc = sample_document();
    let project = doc.project(100).unwrap();
    assert_eq!(project.calendar(&doc).unwrap().clndr_id.get(), Some(1));
    assert_eq!(ids(project.tasks(&doc), |t| t.task_id.get()), [1003, 1001, 1002, 1004]);
    assert_eq!(ids(project.wbs_nodes(&doc), |w| w.wbs_id.get()), [10, 11, 0]);
    assert_eq!(ids(project.calendars(&doc), |c| c.clndr_id.get()), [2]);
}

#[test]
fn calendar_links() {
    let doc = sample_document();
    let project_calendar = doc.calendar(2).unwrap();
    assert_eq!(project_calendar.base_calendar(&doc).unwrap().clndr_id.get(), Some(1));
    assert_eq!(project_calendar.project(&doc).unwrap().proj_id.get(), Some(100));

    let global = doc.calendar(1).unwrap();
    assert!(global.base_calendar(&doc).is_none());
    assert!(global.project(&doc).is_none());
}

#[test]
fn wbs_tree_navigation() {
    let doc = sample_document();
    let root = doc.wbs_node(10).unwrap();
    assert!(root.parent(&doc).is_none());
    assert_eq!(ids(root.children(&doc), |w| w.wbs_id.get()), [11, 0]);
    assert_eq!(ids(root.tasks(&doc), |t| t.task_id.get()), [1004]);

    let design = doc.wbs_node(11).unwrap();
    assert_eq!(design.parent(&doc).unwrap().wbs_id.get(), Some(10));
    assert_eq!(design.project(&doc).unwrap().proj_id.get(), Some(100));
    assert_eq!(ids(design.tasks(&doc), |t| t.task_id.get()), [1003, 1001]);

    let zero = doc.wbs_node(0).unwrap();
    assert!(zero.tasks(&doc).is_empty());
    assert!(zero.children(&doc).is_empty());
}

#[test]
fn resource_links() {
    let doc = sample_document();
    let engineer = doc.resource(500).unwrap();
    assert_eq!(engineer.calendar(&doc).unwrap().clndr_id.get(), Some(1));
    assert!(engineer.parent(&doc).is_none());
    assert_eq!(ids(engineer.assignments(&doc), |a| a.taskrsrc_id.get()), [700]);
    assert_eq!(ids(engineer.categories(&doc), |c| c.rsrc_catg_id.get()), [61]);
    assert_eq!(engineer.categories(&doc)[0].resource(&doc).unwrap().rsrc_id.get(), Some(500));

    let junior = doc.resource(501).unwrap();
    assert_eq!(junior.parent(&doc).unwrap().rsrc_id.get(), Some(500));
    assert!(junior.calendar(&doc).is_none());
}

#[test]
fn predecessor_link_endpoints() {
    let doc = sample_document();
    let link = doc.task_predecessors().find_by_id(1).unwrap();
    assert_eq!(link.task(&doc).unwrap().task_id.get(), Some(1003));
    assert_eq!(link.predecessor(&doc).unwrap().task_id.get(), Some(1001));
    assert_eq!(link.pred_type.as_deref(), Some("PR_FS"));

    let lagged = doc.task_predecessors().find_by_id(2).unwrap();
    assert_eq!(lagged.lag_hr_cnt.get(), Some(8.0));
}

#[test]
fn assignment_links_and_curve() {
    let doc = sample_document();
    let assignment = doc.task_resources().find_by_id(700).unwrap();
    assert_eq!(assignment.task(&doc).unwrap().task_id.get(), Some(1003));
    assert_eq!(assignment.project(&doc).unwrap().proj_id.get(), Some(100));
    assert_eq!(assignment.resource(&doc).unwrap().rsrc_id.get(), Some(500));
    assert_eq!(assignment.actual_qty(), Some(4.0));

    let curve = assignment.resource_curve(&doc).unwrap();
    assert_eq!(curve.pct_usage[0].get(), Some(10.0));
    assert_eq!(curve.pct_usage[1].get(), Some(7.5));
    assert!(curve.pct_usage[2].is_absent());

    let unplanned = doc.task_resources().find_by_id(701).unwrap();
    assert!(unplanned.resource_curve(&doc).is_none());
    assert_eq!(unplanned.actual_qty(), None);
}

#[test]
fn activity_code_links() {
    let doc = sample_document();
    let codes = doc.task_activity_codes();
    assert_eq!(codes.len(), 2);
    for code in codes {
        assert_eq!(code.task(&doc).unwrap().task_id.get(), Some(1003));
        assert_eq!(code.project(&doc).unwrap().proj_id.get(), Some(100));
    }
    assert_eq!(codes.find_all_by_foreign_key("actv_code_id", 43).len(), 1);
}
