use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::{get, post},
    Router,
};
use enrollment_core::models::{BatchCount, Course, CourseRoster, Enrollment, Student};

use super::rpc::{self, QueryInput, RpcResult};
use super::AppState;

const GET_STUDENT: &str = "crud.getStudentsWithCoursesOnId";
const GET_ALL_COURSES: &str = "crud.getAllCourses";
const GET_COURSE_ROSTER: &str = "crud.getStudentsListOnCourseId";
const INSERT_STUDENT: &str = "crud.insertNewStudent";
const INSERT_COURSE: &str = "crud.insertNewCourse";
const ENROLL_STUDENT: &str = "crud.enrollNewStudent";
const UPDATE_COURSE: &str = "crud.updateCourseData";
const REMOVE_STUDENT: &str = "crud.removeStudentfromCourse";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(&procedure(GET_STUDENT), get(get_student))
        .route(&procedure(GET_ALL_COURSES), get(get_all_courses))
        .route(&procedure(GET_COURSE_ROSTER), get(get_course_roster))
        .route(&procedure(INSERT_STUDENT), post(insert_student))
        .route(&procedure(INSERT_COURSE), post(insert_course))
        .route(&procedure(ENROLL_STUDENT), post(enroll_student))
        .route(&procedure(UPDATE_COURSE), post(update_course))
        .route(&procedure(REMOVE_STUDENT), post(remove_student))
}

fn procedure(path: &str) -> String {
    format!("/api/trpc/{path}")
}

async fn get_student(
    State(state): State<AppState>,
    Query(query): Query<QueryInput>,
) -> RpcResult<Student> {
    rpc::call(GET_STUDENT, query.input.as_deref().map(str::as_bytes), |input| {
        state.service.get_student_by_id(input)
    })
}

async fn get_all_courses(State(state): State<AppState>) -> RpcResult<Vec<Course>> {
    rpc::finish(GET_ALL_COURSES, state.service.get_all_courses())
}

async fn get_course_roster(
    State(state): State<AppState>,
    Query(query): Query<QueryInput>,
) -> RpcResult<CourseRoster> {
    rpc::call(GET_COURSE_ROSTER, query.input.as_deref().map(str::as_bytes), |input| {
        state.service.get_students_on_course(input)
    })
}

async fn insert_student(State(state): State<AppState>, body: Bytes) -> RpcResult<Student> {
    rpc::call(INSERT_STUDENT, Some(&body[..]), |input| {
        state.service.insert_student(input)
    })
}

async fn insert_course(State(state): State<AppState>, body: Bytes) -> RpcResult<Course> {
    rpc::call(INSERT_COURSE, Some(&body[..]), |input| state.service.insert_course(input))
}

async fn enroll_student(State(state): State<AppState>, body: Bytes) -> RpcResult<Enrollment> {
    rpc::call(ENROLL_STUDENT, Some(&body[..]), |input| {
        state.service.enroll_student(input)
    })
}

async fn update_course(State(state): State<AppState>, body: Bytes) -> RpcResult<Course> {
    rpc::call(UPDATE_COURSE, Some(&body[..]), |input| state.service.update_course(input))
}

async fn remove_student(State(state): State<AppState>, body: Bytes) -> RpcResult<BatchCount> {
    rpc::call(REMOVE_STUDENT, Some(&body[..]), |input| {
        state.service.remove_student_from_course(input)
    })
}
