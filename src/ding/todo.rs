use tracing::{info, instrument};

use super::DingClient;
use super::models::{
    CreateTodoBody, CreateTodoResponse, DetailUrl, NotifyConfigs, UpdateTodoBody,
    UpdateTodoResponse,
};
use crate::error::DingResult;

/// 待办优先级：普通
const TODO_PRIORITY: u8 = 20;

/// 创建钉钉待办的参数，人员均为钉钉 userid
#[derive(Debug, Clone)]
pub struct TodoRequest {
    pub title: String,
    pub workflow_url: String,
    pub creator_userid: String,
    pub executor_userids: Vec<String>,
}

fn detail_link(workflow_url: &str) -> String {
    format!(
        "dingtalk://dingtalkclient/page/link?url={}&pc_slide=false",
        urlencoding::encode(workflow_url)
    )
}

impl DingClient {
    /// 创建待办，返回任务 id
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_todo(&self, request: &TodoRequest) -> DingResult<String> {
        let token = self.get_access_token().await?;
        let creator_id = self.resolve_union_id(&request.creator_userid).await?;
        let mut executor_ids = Vec::with_capacity(request.executor_userids.len());
        for userid in &request.executor_userids {
            executor_ids.push(self.resolve_union_id(userid).await?);
        }

        let link = detail_link(&request.workflow_url);
        let body = CreateTodoBody {
            subject: request.title.clone(),
            creator_id: creator_id.clone(),
            executor_ids,
            detail_url: DetailUrl {
                app_url: link.clone(),
                pc_url: link,
            },
            is_only_show_executor: true,
            priority: TODO_PRIORITY,
            notify_configs: NotifyConfigs {
                ding_notify: "1".into(),
            },
        };

        let url = self
            .config
            .api_url(&format!("/v1.0/todo/users/{}/tasks", creator_id));
        let resp: CreateTodoResponse = self
            .api_send(self.http.post(&url).json(&body), token.as_str())
            .await?;

        info!(task_id = %resp.id, "Created DingTalk todo");
        Ok(resp.id)
    }

    /// 将待办标记为已完成
    #[instrument(skip(self))]
    pub async fn complete_todo(&self, task_id: &str, creator_userid: &str) -> DingResult<bool> {
        let token = self.get_access_token().await?;
        let creator_id = self.resolve_union_id(creator_userid).await?;

        let url = self.config.api_url(&format!(
            "/v1.0/todo/users/{}/tasks/{}",
            creator_id, task_id
        ));
        let resp: UpdateTodoResponse = self
            .api_send(
                self.http.put(&url).json(&UpdateTodoBody { done: true }),
                token.as_str(),
            )
            .await?;

        info!(result = resp.result, "Updated DingTalk todo");
        Ok(resp.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_link_encodes_workflow_url() {
        assert_eq!(
            detail_link("http://archery/detail/1/?a=b"),
            "dingtalk://dingtalkclient/page/link?url=http%3A%2F%2Farchery%2Fdetail%2F1%2F%3Fa%3Db&pc_slide=false"
        );
    }
}
