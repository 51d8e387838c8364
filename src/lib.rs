// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含凭据泄露记录的核心业务实体
pub mod domain;

/// 富化管道模块
///
/// 实现凭据行解析、URL验证、域名解析、内容探测、
/// 应用指纹识别和标签分配等富化阶段
pub mod pipeline;

/// 基础设施模块
///
/// 提供外部资源集成，如输入文件、模式源和输出接收器
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现批次编排和并行工作器管理
pub mod workers;
