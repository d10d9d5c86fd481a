use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;

use enrollment_core::{Database, Error};

use crate::service::*;

#[derive(Clone)]
pub struct McpServer {
    service: EnrollmentService,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(db: Database) -> Self {
        Self {
            service: EnrollmentService::new(db),
            tool_router: Self::tool_router(),
        }
    }

    fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

/// Caller mistakes become `invalid_params`; store trouble stays internal.
fn to_mcp_error(err: Error) -> McpError {
    match err {
        Error::MissingInput(_)
        | Error::InvalidInput(_)
        | Error::NotFound(_)
        | Error::ConstraintViolation(_) => McpError::invalid_params(err.to_string(), None),
        Error::Store(_) | Error::Io(_) => {
            tracing::error!(error = %err, "tool call failed");
            McpError::internal_error(err.to_string(), None)
        }
    }
}

#[tool_router]
impl McpServer {
    #[tool(description = "Get a student's id, first name and last name by student ID")]
    async fn get_student_by_id(
        &self,
        params: Parameters<StudentIdInput>,
    ) -> Result<CallToolResult, McpError> {
        let student = self.service.get_student_by_id(params.0).map_err(to_mcp_error)?;
        Self::json_result(&student)
    }

    #[tool(description = "List every course with its name and credits")]
    async fn get_all_courses(&self) -> Result<CallToolResult, McpError> {
        let courses = self.service.get_all_courses().map_err(to_mcp_error)?;
        Self::json_result(&courses)
    }

    #[tool(description = "Get a course and the students enrolled in it")]
    async fn get_students_on_course(
        &self,
        params: Parameters<CourseIdInput>,
    ) -> Result<CallToolResult, McpError> {
        let roster = self
            .service
            .get_students_on_course(params.0)
            .map_err(to_mcp_error)?;
        Self::json_result(&roster)
    }

    #[tool(description = "Insert a new student")]
    async fn insert_student(
        &self,
        params: Parameters<NewStudentInput>,
    ) -> Result<CallToolResult, McpError> {
        let student = self.service.insert_student(params.0).map_err(to_mcp_error)?;
        Self::json_result(&student)
    }

    #[tool(description = "Insert a new course")]
    async fn insert_course(
        &self,
        params: Parameters<NewCourseInput>,
    ) -> Result<CallToolResult, McpError> {
        let course = self.service.insert_course(params.0).map_err(to_mcp_error)?;
        Self::json_result(&course)
    }

    #[tool(description = "Enroll a student in a course, dated now")]
    async fn enroll_student(
        &self,
        params: Parameters<StudentCourseInput>,
    ) -> Result<CallToolResult, McpError> {
        let enrollment = self.service.enroll_student(params.0).map_err(to_mcp_error)?;
        Self::json_result(&enrollment)
    }

    #[tool(description = "Update a course's name and/or credits; omitted fields are kept")]
    async fn update_course(
        &self,
        params: Parameters<UpdateCourseDataInput>,
    ) -> Result<CallToolResult, McpError> {
        let course = self.service.update_course(params.0).map_err(to_mcp_error)?;
        Self::json_result(&course)
    }

    #[tool(description = "Remove every enrollment of a student in a course")]
    async fn remove_student_from_course(
        &self,
        params: Parameters<StudentCourseInput>,
    ) -> Result<CallToolResult, McpError> {
        let removed = self
            .service
            .remove_student_from_course(params.0)
            .map_err(to_mcp_error)?;
        Self::json_result(&removed)
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Enrollment MCP server for students, courses and enrollments".into()),
            ..Default::default()
        }
    }
}

pub async fn run_stdio_server(db: Database) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!("Starting enrollment MCP server on stdio");

    let running = McpServer::new(db).serve((stdin(), stdout())).await?;
    let reason = running.waiting().await?;
    tracing::info!(?reason, "Enrollment MCP server stopped");

    Ok(())
}
